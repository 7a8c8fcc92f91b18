use super::command::Command;
use super::shutdown::Shutdown;
use crate::baudot::BaudotEncoder;
use crate::config::TxConfig;
use crate::error::Result;
use crate::radio::{FskPlan, Tuner, TunerEmitter};
use crate::scheduler::{IntervalTicker, Mode, RunOutcome, SymbolScheduler};
use crate::utils::consts::RETUNE_MARKER;
use crossbeam_channel::{Receiver, select};
use tracing::{debug, error, info, warn};

/// What happened during an interactive session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionReport {
    pub transmitted: u32,
    pub interrupted: u32,
    pub failed: u32,
    pub retunes: u32,
    pub missed_ticks: u64,
    pub final_plan: FskPlan,
}

/// Owns the encoder, the symbol clock and the transmitter.
///
/// Commands are handled one at a time: a message is sent to its last bit
/// before the next command is taken off the channel.
pub struct Session<T: Tuner> {
    encoder: BaudotEncoder,
    emitter: TunerEmitter<T>,
    config: TxConfig,
    shutdown: Shutdown,
}

impl<T: Tuner> Session<T> {
    pub fn new(config: TxConfig, tuner: T, shutdown: Shutdown) -> Self {
        Self {
            encoder: BaudotEncoder::new(config.preamble_len),
            emitter: TunerEmitter::new(config.plan(), tuner),
            config,
            shutdown,
        }
    }

    pub fn run(mut self, commands: Receiver<Command>) -> SessionReport {
        let mut report = SessionReport::default();
        info!(
            "Ready. Type a line to send it, {}<hz> to retune.",
            RETUNE_MARKER
        );

        loop {
            let command = select! {
                recv(commands) -> command => command.ok(),
                recv(self.shutdown.receiver()) -> _ => None,
            };
            let Some(command) = command else {
                break;
            };

            match command {
                Command::Transmit(text) => match self.transmit(&text) {
                    Ok((RunOutcome::Completed, missed)) => {
                        report.transmitted += 1;
                        report.missed_ticks += missed;
                    }
                    Ok((RunOutcome::Interrupted, missed)) => {
                        report.interrupted += 1;
                        report.missed_ticks += missed;
                    }
                    Err(e) => {
                        error!("Transmission failed: {}", e);
                        report.failed += 1;
                    }
                },
                Command::Retune(freq_hz) => {
                    self.emitter.retune(freq_hz);
                    report.retunes += 1;
                }
                Command::Quit => break,
            }

            if self.shutdown.is_triggered() {
                break;
            }
        }

        report.final_plan = self.emitter.plan().clone();
        info!(
            "Session over: {} sent, {} interrupted, {} failed",
            report.transmitted, report.interrupted, report.failed
        );
        report
    }

    /// Send one line, ending it with CR LF like a teleprinter operator would.
    fn transmit(&mut self, text: &str) -> Result<(RunOutcome, u64)> {
        let line = format!("{}\r\n", text);
        let encoded = self
            .encoder
            .encode(line.as_bytes(), self.config.buffer_capacity);
        info!(
            "Sending {:?} ({} symbols, {:.1} s)",
            text,
            encoded.bitstream.len_bytes(),
            encoded.bitstream.nbits() as f64 / self.config.baud
        );

        let mut scheduler = SymbolScheduler::new(encoded.bitstream, Mode::OneShot);
        let mut ticker = IntervalTicker::from_baud(self.config.baud)
            .with_shutdown(self.shutdown.receiver().clone());
        let outcome = scheduler.run(&mut ticker, &mut self.emitter)?;

        let stats = scheduler.stats();
        if stats.missed_ticks > 0 {
            warn!(
                "{} late wake-ups, {} bits skipped",
                stats.late_wakeups, stats.missed_ticks
            );
        }
        debug!("{:?}", stats);
        Ok((outcome, stats.missed_ticks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::shutdown;
    use crate::error::Error;
    use crate::radio::LogTuner;

    fn fast_config() -> TxConfig {
        TxConfig {
            baud: 20_000.0,
            preamble_len: 2,
            ..TxConfig::default()
        }
    }

    #[test]
    fn test_transmit_and_retune() {
        let (_trigger, stop) = shutdown::channel();
        let session = Session::new(fast_config(), LogTuner::new(), stop);
        let (tx, rx) = crossbeam_channel::unbounded();

        tx.send(Command::Transmit("RYRY".to_string())).unwrap();
        tx.send(Command::Retune(433_920_000)).unwrap();
        tx.send(Command::Transmit("73".to_string())).unwrap();
        tx.send(Command::Quit).unwrap();

        let report = session.run(rx);
        assert_eq!(report.transmitted, 2);
        assert_eq!(report.retunes, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(report.final_plan.center_freq_hz, 433_920_000);
    }

    #[test]
    fn test_closed_channel_ends_session() {
        let (_trigger, stop) = shutdown::channel();
        let session = Session::new(fast_config(), LogTuner::new(), stop);
        let (tx, rx) = crossbeam_channel::unbounded::<Command>();
        drop(tx);
        assert_eq!(session.run(rx).transmitted, 0);
    }

    #[test]
    fn test_shutdown_interrupts() {
        crate::utils::logging::init_test_logging();
        let (mut trigger, stop) = shutdown::channel();
        let config = TxConfig {
            baud: 45.45,
            ..fast_config()
        };
        let session = Session::new(config, LogTuner::new(), stop);
        let (tx, rx) = crossbeam_channel::unbounded();
        tx.send(Command::Transmit("THIS TAKES SECONDS".to_string()))
            .unwrap();

        let handle = std::thread::spawn(move || session.run(rx));
        std::thread::sleep(std::time::Duration::from_millis(100));
        trigger.trigger();

        let report = handle.join().unwrap();
        assert_eq!(report.interrupted, 1);
        assert_eq!(report.transmitted, 0);
    }

    #[test]
    fn test_retune_to_top_of_range() {
        let (_trigger, stop) = shutdown::channel();
        let session = Session::new(fast_config(), LogTuner::new(), stop);
        let (tx, rx) = crossbeam_channel::unbounded();
        tx.send(Command::Retune(u64::MAX)).unwrap();
        tx.send(Command::Transmit("A".to_string())).unwrap();
        tx.send(Command::Quit).unwrap();

        let report = session.run(rx);
        assert_eq!(report.transmitted, 1);
        assert_eq!(report.final_plan.mark_freq_hz(), u64::MAX);
    }

    struct DeadTuner;

    impl Tuner for DeadTuner {
        fn set_center_freq(&mut self, freq_hz: u64) -> Result<()> {
            Err(Error::Tune {
                freq_hz,
                reason: "no device".to_string(),
            })
        }
    }

    #[test]
    fn test_tuner_failure_is_reported() {
        let (_trigger, stop) = shutdown::channel();
        let session = Session::new(fast_config(), DeadTuner, stop);
        let (tx, rx) = crossbeam_channel::unbounded();
        tx.send(Command::Transmit("HI".to_string())).unwrap();
        tx.send(Command::Quit).unwrap();

        let report = session.run(rx);
        assert_eq!(report.failed, 1);
        assert_eq!(report.transmitted, 0);
    }
}

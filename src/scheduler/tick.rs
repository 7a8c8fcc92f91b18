use crate::error::{Error, Result};
use crossbeam_channel::{Receiver, select};
use std::time::{Duration, Instant};
use tracing::trace;

/// Periodic symbol clock.
pub trait TickSource {
    /// Block until at least one period has elapsed since the previous return
    /// and report how many did. An error means the clock is gone and the
    /// transmission should stop.
    fn wait(&mut self) -> Result<u64>;
}

/// Monotonic interval timer.
///
/// Counts whole periods since construction, so a wake-up that comes late
/// reports every period that passed in the meantime.
pub struct IntervalTicker {
    period: Duration,
    epoch: Instant,
    consumed: u64,
    shutdown: Option<Receiver<()>>,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            epoch: Instant::now(),
            consumed: 0,
            shutdown: None,
        }
    }

    /// Period of `1 / baud` seconds, rounded to the nanosecond.
    pub fn from_baud(baud: f64) -> Self {
        Self::new(symbol_period(baud))
    }

    /// Abandon waits as soon as `shutdown` fires or disconnects.
    pub fn with_shutdown(mut self, shutdown: Receiver<()>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    fn elapsed_periods(&self) -> u64 {
        (self.epoch.elapsed().as_nanos() / self.period.as_nanos().max(1)) as u64
    }

    fn deadline(&self, periods: u64) -> Instant {
        self.epoch + Duration::from_nanos((self.period.as_nanos() as u64).saturating_mul(periods))
    }
}

impl TickSource for IntervalTicker {
    fn wait(&mut self) -> Result<u64> {
        loop {
            let total = self.elapsed_periods();
            if total > self.consumed {
                let count = total - self.consumed;
                self.consumed = total;
                return Ok(count);
            }

            let timeout = self
                .deadline(self.consumed + 1)
                .saturating_duration_since(Instant::now());
            trace!("sleeping {:?} until next tick", timeout);

            let cancelled = match &self.shutdown {
                Some(shutdown) => select! {
                    recv(shutdown) -> _ => true,
                    default(timeout) => false,
                },
                None => {
                    std::thread::sleep(timeout);
                    false
                }
            };
            if cancelled {
                return Err(Error::TickCancelled);
            }
        }
    }
}

pub fn symbol_period(baud: f64) -> Duration {
    Duration::from_nanos((1e9 / baud + 0.5) as u64)
}

/// Replays a fixed list of tick counts, then fails.
#[derive(Clone, Debug)]
pub struct ScriptedTicks {
    counts: Vec<u64>,
    next: usize,
}

impl ScriptedTicks {
    pub fn new(counts: Vec<u64>) -> Self {
        Self { counts, next: 0 }
    }
}

impl TickSource for ScriptedTicks {
    fn wait(&mut self) -> Result<u64> {
        let count = self
            .counts
            .get(self.next)
            .copied()
            .ok_or(Error::TicksExhausted { count: self.next })?;
        self.next += 1;
        Ok(count)
    }
}

use crate::bitstream::Bitstream;
use crate::error::Result;
use crate::radio::{Tone, ToneEmitter};
use super::tick::TickSource;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Repeat the message forever (beacon)
    Looping,
    /// Send the message once
    OneShot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Continue,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// One-shot message sent to the last bit
    Completed,
    /// Tick source stopped (shutdown) before the message was done
    Interrupted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub wakeups: u64,
    pub ticks: u64,
    /// Wake-ups that reported more than one tick
    pub late_wakeups: u64,
    /// Bits skipped over by late wake-ups
    pub missed_ticks: u64,
    /// Calls made to the tone emitter
    pub tone_changes: u64,
}

/// Walks a bitstream one symbol clock tick at a time.
///
/// The cursor always moves by the number of ticks the clock reports, so a
/// late wake-up skips the bits whose time has already passed and the
/// transmitted bit stays aligned with wall-clock time.
pub struct SymbolScheduler {
    bitstream: Bitstream,
    mode: Mode,
    cursor: usize,
    finished: bool,
    last_tone: Option<Tone>,
    stats: SchedulerStats,
}

impl SymbolScheduler {
    pub fn new(bitstream: Bitstream, mode: Mode) -> Self {
        let finished = bitstream.is_empty();
        Self {
            bitstream,
            mode,
            cursor: 0,
            finished,
            last_tone: None,
            stats: SchedulerStats::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn nbits(&self) -> usize {
        self.bitstream.nbits()
    }

    /// Bit index that is on air now
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn bitstream(&self) -> &Bitstream {
        &self.bitstream
    }

    /// Tone for the bit under the cursor, `None` once finished.
    pub fn current_tone(&self) -> Option<Tone> {
        if self.finished {
            None
        } else {
            Some(Tone::from_bit(self.bitstream.bit(self.cursor)))
        }
    }

    /// Move the cursor by `ticks` symbol periods.
    pub fn advance(&mut self, ticks: u64) -> Advance {
        if self.finished {
            return Advance::Finished;
        }

        self.stats.wakeups += 1;
        self.stats.ticks += ticks;
        if ticks > 1 {
            self.stats.late_wakeups += 1;
            self.stats.missed_ticks += ticks - 1;
            warn!("Missed {} bits", ticks - 1);
        }

        let nbits = self.nbits() as u64;
        let next = self.cursor as u64 + ticks;
        match self.mode {
            Mode::Looping => {
                self.cursor = (next % nbits) as usize;
                Advance::Continue
            }
            Mode::OneShot if next >= nbits => {
                self.cursor = self.nbits();
                self.finished = true;
                Advance::Finished
            }
            Mode::OneShot => {
                self.cursor = next as usize;
                Advance::Continue
            }
        }
    }

    /// Hand the current tone to the emitter if it differs from the last one.
    pub fn emit_current(&mut self, emitter: &mut dyn ToneEmitter) -> Result<()> {
        let Some(tone) = self.current_tone() else {
            return Ok(());
        };
        if self.last_tone == Some(tone) {
            return Ok(());
        }

        if let Err(err) = emitter.emit(tone) {
            // unknown hardware state, make the next attempt emit again
            self.last_tone = None;
            return Err(err);
        }
        self.last_tone = Some(tone);
        self.stats.tone_changes += 1;
        Ok(())
    }

    /// Start over from the first bit.
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.finished = self.bitstream.is_empty();
        self.last_tone = None;
    }

    pub fn run(
        &mut self,
        ticks: &mut dyn TickSource,
        emitter: &mut dyn ToneEmitter,
    ) -> Result<RunOutcome> {
        self.run_with_progress(ticks, emitter, |_| {})
    }

    /// Transmit until finished (one-shot) or until the tick source stops.
    ///
    /// `progress` sees the cursor after every advance. Emitter errors are
    /// returned with the cursor left on the bit that failed.
    pub fn run_with_progress(
        &mut self,
        ticks: &mut dyn TickSource,
        emitter: &mut dyn ToneEmitter,
        mut progress: impl FnMut(usize),
    ) -> Result<RunOutcome> {
        debug!(
            "Scheduler start: {} bits, {:?}, cursor {}",
            self.nbits(),
            self.mode,
            self.cursor
        );

        while !self.finished {
            self.emit_current(emitter)?;

            let count = match ticks.wait() {
                Ok(count) => count,
                Err(err) => {
                    info!("Transmission stopped at bit {}: {}", self.cursor, err);
                    return Ok(RunOutcome::Interrupted);
                }
            };
            self.advance(count);
            progress(self.cursor);
        }

        debug!("Scheduler done: {:?}", self.stats);
        Ok(RunOutcome::Completed)
    }
}

use super::plan::FskPlan;
use crate::error::Result;
use tracing::{debug, info};

/// One of the two FSK tones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Bit 1, also the idle line state
    Mark,
    /// Bit 0
    Space,
}

impl Tone {
    pub fn from_bit(bit: bool) -> Self {
        if bit { Tone::Mark } else { Tone::Space }
    }

    pub fn is_mark(self) -> bool {
        self == Tone::Mark
    }
}

/// Whatever turns a tone selection into a transmission.
///
/// Called at most once per symbol clock tick, and the next tick is not
/// processed until it returns.
pub trait ToneEmitter {
    fn emit(&mut self, tone: Tone) -> Result<()>;
}

/// Keeps every tone it is given.
#[derive(Clone, Debug, Default)]
pub struct RecordingEmitter {
    pub tones: Vec<Tone>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ToneEmitter for RecordingEmitter {
    fn emit(&mut self, tone: Tone) -> Result<()> {
        self.tones.push(tone);
        Ok(())
    }
}

/// Hardware side of a tuned transmitter.
pub trait Tuner: Send {
    fn set_center_freq(&mut self, freq_hz: u64) -> Result<()>;
}

/// Tuner that only logs, for dry runs and hosts without a radio.
#[derive(Clone, Debug, Default)]
pub struct LogTuner {
    last_freq_hz: Option<u64>,
    retunes: u64,
}

impl LogTuner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_freq_hz(&self) -> Option<u64> {
        self.last_freq_hz
    }

    pub fn retunes(&self) -> u64 {
        self.retunes
    }
}

impl Tuner for LogTuner {
    fn set_center_freq(&mut self, freq_hz: u64) -> Result<()> {
        debug!("tune {} Hz", freq_hz);
        self.last_freq_hz = Some(freq_hz);
        self.retunes += 1;
        Ok(())
    }
}

/// FSK by retuning: each tone maps to a tuner frequency from the plan.
pub struct TunerEmitter<T: Tuner> {
    plan: FskPlan,
    tuner: T,
}

impl<T: Tuner> TunerEmitter<T> {
    pub fn new(plan: FskPlan, tuner: T) -> Self {
        info!(
            "FSK plan: mark {} Hz (tune {}), space {} Hz (tune {})",
            plan.mark_freq_hz(),
            plan.tune_freq_hz(Tone::Mark),
            plan.space_freq_hz(),
            plan.tune_freq_hz(Tone::Space)
        );
        Self { plan, tuner }
    }

    pub fn plan(&self) -> &FskPlan {
        &self.plan
    }

    /// Move the transmission to a new center frequency.
    pub fn retune(&mut self, center_freq_hz: u64) {
        self.plan.center_freq_hz = center_freq_hz;
        info!(
            "Center frequency now {} Hz (mark {} Hz, space {} Hz)",
            center_freq_hz,
            self.plan.mark_freq_hz(),
            self.plan.space_freq_hz()
        );
    }

    pub fn tuner(&self) -> &T {
        &self.tuner
    }
}

impl<T: Tuner> ToneEmitter for TunerEmitter<T> {
    fn emit(&mut self, tone: Tone) -> Result<()> {
        self.tuner
            .set_center_freq(self.plan.tune_freq_hz(tone))
    }
}

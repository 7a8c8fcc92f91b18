// Transmit side: tone selection, frequency plan and audio rendering

pub mod emitter;
pub mod fsk;
pub mod plan;

pub use emitter::{LogTuner, RecordingEmitter, Tone, ToneEmitter, Tuner, TunerEmitter};
pub use fsk::{FskModulator, write_wav};
pub use plan::FskPlan;

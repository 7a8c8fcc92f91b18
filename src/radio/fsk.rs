//! Audio FSK rendering of a bitstream (AFSK), for playback into a transmitter
//! audio input or for checking a message with an RTTY decoder.

use crate::error::{Result, WavWriteSnafu};
use crate::utils::consts::*;
use snafu::ResultExt;
use std::f32::consts::PI;
use std::path::Path;
use tracing::info;

/// Continuous-phase two-tone modulator.
pub struct FskModulator {
    sample_rate: f32,
    mark_hz: f32,
    space_hz: f32,
    samples_per_bit: f64,
    amplitude: f32,
    phase: f32,
    // fractional samples carried between bits
    sample_debt: f64,
}

impl FskModulator {
    pub fn new(sample_rate: u32, baud: f64, mark_hz: f32, space_hz: f32) -> Self {
        Self {
            sample_rate: sample_rate as f32,
            mark_hz,
            space_hz,
            samples_per_bit: sample_rate as f64 / baud,
            amplitude: AUDIO_AMPLITUDE,
            phase: 0.0,
            sample_debt: 0.0,
        }
    }

    /// Standard 170 Hz shift AFSK at 45.45 baud
    pub fn new_default() -> Self {
        Self::new(AUDIO_SAMPLE_RATE, DEFAULT_BAUD, AUDIO_MARK_HZ, AUDIO_SPACE_HZ)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate as u32
    }

    /// Append the samples for one bit, keeping the phase continuous.
    pub fn modulate_bit(&mut self, bit: bool, out: &mut Vec<f32>) {
        let freq = if bit { self.mark_hz } else { self.space_hz };
        let phase_increment = 2.0 * PI * freq / self.sample_rate;

        self.sample_debt += self.samples_per_bit;
        let count = self.sample_debt.floor() as usize;
        self.sample_debt -= count as f64;

        for _ in 0..count {
            out.push(self.amplitude * self.phase.sin());
            self.phase += phase_increment;
            // keep phase in [0, 2π)
            if self.phase >= 2.0 * PI {
                self.phase -= 2.0 * PI;
            }
        }
    }

        pub fn modulate_bits(&mut self, bits: impl IntoIterator<Item = bool>) -> Vec<f32> {
        let mut samples = Vec::new();
        for bit in bits {
            self.modulate_bit(bit, &mut samples);
        }
        samples
    }
}

/// Write mono 16-bit PCM.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let path_str = path.display().to_string();

    let mut writer = hound::WavWriter::create(path, spec).context(WavWriteSnafu {
        path: path_str.clone(),
    })?;
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(value)
            .context(WavWriteSnafu {
                path: path_str.clone(),
            })?;
    }
    writer
        .finalize()
        .context(WavWriteSnafu { path: path_str })?;

    info!(
        "Wrote {} samples ({:.2} s) to {}",
        samples.len(),
        samples.len() as f32 / sample_rate as f32,
        path.display()
    );
    Ok(())
}

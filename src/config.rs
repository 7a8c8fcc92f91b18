use crate::error::{ConfigParseSnafu, ConfigReadSnafu, InvalidConfigSnafu, Result};
use crate::radio::FskPlan;
use crate::utils::consts::*;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Transmitter settings, loadable from a JSON file. Missing keys take defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxConfig {
    pub center_freq_hz: u64,
    /// Mark offset from the center frequency
    pub tone_hz: u64,
    /// Mark to space distance
    pub shift_hz: u64,
    pub if_freq_hz: u64,

    pub baud: f64,
    pub preamble_len: usize,
    pub buffer_capacity: usize,

    // audio rendering
    pub audio_sample_rate: u32,
    pub audio_mark_hz: f32,
    pub audio_space_hz: f32,
}

impl Default for TxConfig {
    fn default() -> Self {
        Self {
            center_freq_hz: DEFAULT_CENTER_FREQ_HZ,
            tone_hz: DEFAULT_TONE_HZ,
            shift_hz: DEFAULT_SHIFT_HZ,
            if_freq_hz: DEFAULT_IF_FREQ_HZ,
            baud: DEFAULT_BAUD,
            preamble_len: BEACON_PREAMBLE_LEN,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            audio_sample_rate: AUDIO_SAMPLE_RATE,
            audio_mark_hz: AUDIO_MARK_HZ,
            audio_space_hz: AUDIO_SPACE_HZ,
        }
    }
}

impl TxConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let path_str = path.display().to_string();
        let text = std::fs::read_to_string(path).context(ConfigReadSnafu {
            path: path_str.clone(),
        })?;
        let config = Self::from_json(&text).context(ConfigParseSnafu { path: path_str })?;
        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Reject values that would stall the symbol clock or overflow the plan.
    pub fn validate(&self) -> Result<()> {
        if !self.baud.is_finite() || self.baud <= 0.0 {
            return InvalidConfigSnafu {
                field: "baud",
                reason: format!("{} is not a positive symbol rate", self.baud),
            }
            .fail();
        }
        if self.center_freq_hz > MAX_FREQ_HZ {
            return InvalidConfigSnafu {
                field: "center_freq_hz",
                reason: format!("{} Hz is above {} Hz", self.center_freq_hz, MAX_FREQ_HZ),
            }
            .fail();
        }
        if self.audio_sample_rate == 0 {
            return InvalidConfigSnafu {
                field: "audio_sample_rate",
                reason: "must be non-zero".to_string(),
            }
            .fail();
        }
        Ok(())
    }

    pub fn plan(&self) -> FskPlan {
        FskPlan {
            center_freq_hz: self.center_freq_hz,
            tone_hz: self.tone_hz,
            shift_hz: self.shift_hz,
            if_freq_hz: self.if_freq_hz,
        }
    }

    pub fn symbol_period(&self) -> Duration {
        crate::scheduler::symbol_period(self.baud)
    }

    pub fn log_summary(&self) {
        info!("Transmitter config:");
        info!("  Center: {} Hz", self.center_freq_hz);
        info!("  Tone / shift: {} / {} Hz", self.tone_hz, self.shift_hz);
        info!("  IF: {} Hz", self.if_freq_hz);
        info!(
            "  Symbol rate: {} baud ({:.3} ms)",
            self.baud,
            self.symbol_period().as_secs_f64() * 1000.0
        );
        info!(
            "  Preamble: {} symbols, buffer {} bytes",
            self.preamble_len, self.buffer_capacity
        );
    }
}

use super::emitter::Tone;
use crate::utils::consts::*;
use serde::{Deserialize, Serialize};

/// Two-tone frequency plan for transmitting on a tuner's LO harmonic.
///
/// mark = center + tone, space = mark - shift. The tuner is set to
/// `freq / TUNER_HARMONIC - if_freq` so the harmonic lands on `freq`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FskPlan {
    pub center_freq_hz: u64,
    pub tone_hz: u64,
    pub shift_hz: u64,
    pub if_freq_hz: u64,
}

impl FskPlan {
    pub fn mark_freq_hz(&self) -> u64 {
        self.center_freq_hz.saturating_add(self.tone_hz)
    }

    pub fn space_freq_hz(&self) -> u64 {
        self.mark_freq_hz().saturating_sub(self.shift_hz)
    }

    pub fn freq_hz(&self, tone: Tone) -> u64 {
        match tone {
            Tone::Mark => self.mark_freq_hz(),
            Tone::Space => self.space_freq_hz(),
        }
    }

    /// Tuner setting that puts `tone` on air
    pub fn tune_freq_hz(&self, tone: Tone) -> u64 {
        (self.freq_hz(tone) / TUNER_HARMONIC).saturating_sub(self.if_freq_hz)
    }
}

impl Default for FskPlan {
    fn default() -> Self {
        Self {
            center_freq_hz: DEFAULT_CENTER_FREQ_HZ,
            tone_hz: DEFAULT_TONE_HZ,
            shift_hz: DEFAULT_SHIFT_HZ,
            if_freq_hz: DEFAULT_IF_FREQ_HZ,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan() {
        let plan = FskPlan::default();
        assert_eq!(plan.mark_freq_hz(), 1_250_000_200);
        assert_eq!(plan.space_freq_hz(), 1_249_999_760);
        assert_eq!(plan.tune_freq_hz(Tone::Mark), 308_900_050);
        assert_eq!(plan.tune_freq_hz(Tone::Space), 308_899_940);
    }

    #[test]
    fn test_shift_is_preserved() {
        let plan = FskPlan {
            center_freq_hz: 144_000_000,
            tone_hz: 1000,
            shift_hz: 170,
            if_freq_hz: 0,
        };
        assert_eq!(plan.freq_hz(Tone::Mark) - plan.freq_hz(Tone::Space), 170);
    }

    #[test]
    fn test_huge_center_saturates() {
        let plan = FskPlan {
            center_freq_hz: u64::MAX,
            ..FskPlan::default()
        };
        assert_eq!(plan.mark_freq_hz(), u64::MAX);
        assert_eq!(plan.space_freq_hz(), u64::MAX - DEFAULT_SHIFT_HZ);
        assert!(plan.tune_freq_hz(Tone::Mark) > 0);
    }
}

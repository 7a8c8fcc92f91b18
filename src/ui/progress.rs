use crate::scheduler::RunOutcome;
use indicatif::{ProgressBar, ProgressStyle};

pub mod templates {
    pub const TRANSMIT: &str =
        "\u{f048a} SEND [{bar:30.cyan}] {percent}% ({pos}/{len} bits) {msg}";
}

/// Bit-count bar for a one-shot transmission.
pub struct TransmitProgress {
    bar: ProgressBar,
}

impl TransmitProgress {
    pub fn new(nbits: usize, message: &str) -> Self {
        Self::with_bar(ProgressBar::new(nbits as u64), message)
    }

    /// Same bar, never drawn
    pub fn hidden(nbits: usize, message: &str) -> Self {
        Self::with_bar(ProgressBar::hidden(), message).with_len(nbits)
    }

    fn with_bar(bar: ProgressBar, message: &str) -> Self {
        let style = ProgressStyle::default_bar()
            .template(templates::TRANSMIT)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ ");
        bar.set_style(style);
        bar.set_message(message.to_string());
        Self { bar }
    }

    fn with_len(self, nbits: usize) -> Self {
        self.bar.set_length(nbits as u64);
        self
    }

    /// Scheduler cursor, in bits
    pub fn set_position(&self, bit: usize) {
        self.bar.set_position(bit as u64);
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Leave the bar on screen labelled with how the send ended.
    pub fn finish(&self, outcome: RunOutcome) {
        let label = match outcome {
            RunOutcome::Completed => "sent",
            RunOutcome::Interrupted => "interrupted",
        };
        self.bar.finish_with_message(label);
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

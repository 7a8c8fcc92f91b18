use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The tick source was asked to stop while waiting
    #[snafu(display("tick wait cancelled by shutdown"))]
    TickCancelled,

    /// A scripted tick source ran out of ticks
    #[snafu(display("tick source exhausted after {count} wake-ups"))]
    TicksExhausted { count: usize },

    /// The tuner backend refused a frequency
    #[snafu(display("failed to tune to {freq_hz} Hz: {reason}"))]
    Tune { freq_hz: u64, reason: String },

    #[snafu(display("failed to read config {path}: {source}"))]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    #[snafu(display("failed to parse config {path}: {source}"))]
    ConfigParse {
        path: String,
        source: serde_json::Error,
    },

    /// A config value the transmitter cannot run with
    #[snafu(display("invalid config value for {field}: {reason}"))]
    InvalidConfig { field: String, reason: String },

    #[snafu(display("failed to write wav {path}: {source}"))]
    WavWrite { path: String, source: hound::Error },

    /// A byte that is not a start-stop framed symbol
    #[snafu(display("byte {byte:#04x} at offset {offset} is not a framed symbol"))]
    Framing { byte: u8, offset: usize },

    #[snafu(display("invalid operator command {line:?}: {reason}"))]
    Command { line: String, reason: String },

    #[snafu(display("failed to install signal handler: {source}"))]
    Signal { source: ctrlc::Error },
}

pub type Result<T> = std::result::Result<T, Error>;

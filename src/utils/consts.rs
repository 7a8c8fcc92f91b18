/// Log level (overridden by RUST_LOG)
pub const LOG_LEVEL: &str = "info";

// ============================================================================
// Baudot / ITA2 framing
// ============================================================================

/// Start bit, transmitted first (bit 0)
pub const START_BITS: u8 = 0x00;

/// Two stop bits (bits 6 and 7)
pub const STOP_BITS: u8 = 0xC0;

/// Mask of the five data bits once shifted into place
pub const DATA_MASK: u8 = 0x3E;

pub const FIGURES_SHIFT: u8 = 0x1B;
pub const LETTERS_SHIFT: u8 = 0x1F;

/// Preamble repetitions of the letters-shift symbol
pub const DEFAULT_PREAMBLE_LEN: usize = 2;

/// Beacons repeat forever, so a longer preamble helps receivers lock on
pub const BEACON_PREAMBLE_LEN: usize = 8;

/// Encoder output capacity in bytes
pub const DEFAULT_BUFFER_CAPACITY: usize = 512;

// ============================================================================
// Symbol clock
// ============================================================================

/// Historical teleprinter rate
pub const DEFAULT_BAUD: f64 = 45.45;

// ============================================================================
// Radio
// ============================================================================

pub const DEFAULT_CENTER_FREQ_HZ: u64 = 1_250_000_000;
/// Mark tone offset from the center frequency
pub const DEFAULT_TONE_HZ: u64 = 200;
/// Space = mark - shift
pub const DEFAULT_SHIFT_HZ: u64 = 440;
pub const DEFAULT_IF_FREQ_HZ: u64 = 3_600_000;
/// Highest center frequency accepted from the operator or a config file
pub const MAX_FREQ_HZ: u64 = 100_000_000_000;

/// Tuner LO harmonic used for transmission
pub const TUNER_HARMONIC: u64 = 4;

// ============================================================================
// Audio rendering
// ============================================================================

pub const AUDIO_SAMPLE_RATE: u32 = 48000;
pub const AUDIO_MARK_HZ: f32 = 2125.0;
pub const AUDIO_SPACE_HZ: f32 = 2295.0;
pub const AUDIO_AMPLITUDE: f32 = 0.8;

// ============================================================================
// Interactive control
// ============================================================================

/// Lines starting with this retune instead of transmitting
pub const RETUNE_MARKER: char = '@';

pub const PROMPT: &str = "tx";

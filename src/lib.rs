//! RTTY (45.45 baud Baudot FSK) transmitter core: ITA2 encoding with
//! start-stop framing, and a symbol clock that turns the encoded bitstream
//! into tone selections while riding out late wake-ups.

pub mod baudot;
pub mod bitstream;
pub mod config;
pub mod control;
pub mod error;
pub mod radio;
pub mod scheduler;
pub mod ui;
pub mod utils;

pub use bitstream::Bitstream;
pub use error::{Error, Result};

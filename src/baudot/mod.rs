// Baudot / ITA2 teleprinter code

pub mod decoder;
pub mod encoder;
pub mod table;

pub use decoder::{BaudotDecoder, decode};
pub use encoder::{BaudotEncoder, Encoded, encode};
pub use table::{CodeEntry, Shift, ShiftRequirement};

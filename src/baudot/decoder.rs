use super::table::{self, Shift};
use crate::error::{Error, Result};
use tracing::trace;

/// Turns framed ITA2 symbols back into text.
///
/// Keeps the receive-side case between calls, the way a teleprinter does.
#[derive(Clone, Debug)]
pub struct BaudotDecoder {
    shift: Shift,
}

impl BaudotDecoder {
    pub fn new() -> Self {
        Self {
            shift: Shift::Letters,
        }
    }

    pub fn shift(&self) -> Shift {
        self.shift
    }

    /// Decode one framed symbol. Shift codes update the case and yield nothing.
    pub fn push(&mut self, symbol: u8, offset: usize) -> Result<Option<u8>> {
        let code = table::unframe(symbol).ok_or(Error::Framing {
            byte: symbol,
            offset,
        })?;

        if let Some(shift) = Shift::from_shift_code(code) {
            trace!("shift to {:?} at {}", shift, offset);
            self.shift = shift;
            return Ok(None);
        }

        let byte = table::character(code, self.shift);
        if let Some(entry) = byte.and_then(table::lookup) {
            if let Some(after) = entry.shift_after {
                self.shift = after;
            }
        }
        Ok(byte)
    }

    /// Decode a whole buffer, preamble included.
    pub fn decode(&mut self, symbols: &[u8]) -> Result<Vec<u8>> {
        let mut text = Vec::with_capacity(symbols.len());
        for (offset, &symbol) in symbols.iter().enumerate() {
            if let Some(byte) = self.push(symbol, offset)? {
                text.push(byte);
            }
        }
        Ok(text)
    }

    pub fn reset(&mut self) {
        self.shift = Shift::Letters;
    }
}

impl Default for BaudotDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a buffer starting in letters case.
pub fn decode(symbols: &[u8]) -> Result<String> {
    let bytes = BaudotDecoder::new().decode(symbols)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baudot::encoder::BaudotEncoder;

    #[test]
    fn test_round_trip_text() {
        let text = "RYRYRY CQ CQ DE N0CALL 73 = (TEST) 1/2?\r\n";
        let encoded = BaudotEncoder::default().encode(text.as_bytes(), 512);
        assert_eq!(decode(encoded.bitstream.as_bytes()).unwrap(), text);
    }

    #[test]
    fn test_lowercase_comes_back_upper() {
        let encoded = BaudotEncoder::default().encode(b"hello world", 64);
        assert_eq!(decode(encoded.bitstream.as_bytes()).unwrap(), "HELLO WORLD");
    }

    #[test]
    fn test_space_resets_receiver() {
        let mut decoder = BaudotDecoder::new();
        // FIGS, '5', space, code 0x03 without a shift
        let text = decoder
            .decode(&[0xF6, table::frame(0x10), table::frame(0x04), table::frame(0x03)])
            .unwrap();
        assert_eq!(text, b"5 A");
        assert_eq!(decoder.shift(), Shift::Letters);
    }

    #[test]
    fn test_bad_framing() {
        let err = decode(&[0xFE, 0x3E]).unwrap_err();
        assert!(matches!(err, Error::Framing { byte: 0x3E, offset: 1 }));
    }
}

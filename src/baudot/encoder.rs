use super::table::{self, Shift};
use crate::bitstream::Bitstream;
use crate::utils::consts::{DEFAULT_PREAMBLE_LEN, LETTERS_SHIFT};
use tracing::{debug, warn};

/// Symbols produced for one input character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Step {
    /// Framed shift code sent before the character, if the case changes
    shift_symbol: Option<u8>,
    symbol: u8,
    /// Case after the character has been sent
    next_shift: Shift,
}

impl Step {
    fn len(&self) -> usize {
        if self.shift_symbol.is_some() { 2 } else { 1 }
    }
}

/// Work out the symbols for `byte` in case `shift` without committing anything.
fn step(byte: u8, shift: Shift) -> Option<Step> {
    let entry = table::lookup(byte)?;

    let mut next_shift = shift;
    let shift_symbol = if entry.shift.allows(shift) {
        None
    } else {
        next_shift = entry.shift.target();
        Some(table::frame(next_shift.shift_code()))
    };

    if let Some(after) = entry.shift_after {
        next_shift = after;
    }

    Some(Step {
        shift_symbol,
        symbol: table::frame(entry.code),
        next_shift,
    })
}

/// Result of [`BaudotEncoder::encode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    pub bitstream: Bitstream,
    /// Input bytes processed, skipped ones included
    pub consumed: usize,
    pub input_len: usize,
}

impl Encoded {
    pub fn is_truncated(&self) -> bool {
        self.consumed < self.input_len
    }
}

/// ASCII to ITA2 encoder with start-stop framing and a letters-shift preamble.
#[derive(Clone, Debug)]
pub struct BaudotEncoder {
    preamble_len: usize,
}

impl BaudotEncoder {
    /// # Arguments
    /// * `preamble_len` - Letters-shift symbols sent before the data so the
    ///   receiver can find symbol boundaries
    pub fn new(preamble_len: usize) -> Self {
        Self { preamble_len }
    }

    pub fn preamble_len(&self) -> usize {
        self.preamble_len
    }

    /// Encode `input` into `output`, returning the number of bytes written.
    ///
    /// Characters with no ITA2 code are skipped. Encoding stops at the first
    /// character whose symbols do not fit; a shift symbol is never written
    /// without the character that needed it. If the preamble itself does not
    /// fit nothing is written.
    pub fn encode_into(&self, output: &mut [u8], input: &[u8]) -> usize {
        self.encode_counted(output, input).0
    }

    /// Encode into a fresh buffer of `capacity` bytes.
    pub fn encode(&self, input: &[u8], capacity: usize) -> Encoded {
        let mut buffer = vec![0u8; capacity];
        let (written, consumed) = self.encode_counted(&mut buffer, input);
        buffer.truncate(written);

        let encoded = Encoded {
            bitstream: Bitstream::from_bytes(buffer),
            consumed,
            input_len: input.len(),
        };
        if encoded.is_truncated() {
            warn!(
                "Message truncated: {} of {} characters fit in {} bytes",
                consumed,
                input.len(),
                capacity
            );
        }
        encoded
    }

    fn encode_counted(&self, output: &mut [u8], input: &[u8]) -> (usize, usize) {
        if self.preamble_len > output.len() {
            debug!(
                "Buffer of {} bytes cannot hold a {} symbol preamble",
                output.len(),
                self.preamble_len
            );
            return (0, 0);
        }

        output[..self.preamble_len].fill(table::frame(LETTERS_SHIFT));
        let mut written = self.preamble_len;
        let mut shift = Shift::Letters;
        let mut consumed = 0;

        for &byte in input {
            let Some(step) = step(byte, shift) else {
                consumed += 1;
                continue;
            };
            if written + step.len() > output.len() {
                break;
            }
            if let Some(shift_symbol) = step.shift_symbol {
                output[written] = shift_symbol;
                written += 1;
            }
            output[written] = step.symbol;
            written += 1;
            shift = step.next_shift;
            consumed += 1;
        }

        debug!(
            "Encoded {}/{} input bytes into {} symbols",
            consumed,
            input.len(),
            written
        );
        (written, consumed)
    }
}

impl Default for BaudotEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_PREAMBLE_LEN)
    }
}

/// Encode with the default two-symbol preamble.
pub fn encode(output: &mut [u8], input: &[u8]) -> usize {
    BaudotEncoder::default().encode_into(output, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baudot::table::ShiftRequirement;
    use crate::utils::consts::FIGURES_SHIFT;

    const LTRS: u8 = 0xFE;
    const FIGS: u8 = 0xF6;

    fn encode_vec(input: &[u8]) -> Vec<u8> {
        let mut buf = [0u8; 256];
        let n = encode(&mut buf, input);
        buf[..n].to_vec()
    }

    #[test]
    fn test_preamble_only() {
        assert_eq!(encode_vec(b""), vec![LTRS, LTRS]);
        assert_eq!(encode_vec(b"@~"), vec![LTRS, LTRS]);
    }

    #[test]
    fn test_single_characters() {
        for byte in table::supported_bytes() {
            let out = encode_vec(&[byte]);
            let entry = table::lookup(byte).unwrap();
            match entry.shift {
                ShiftRequirement::Figures => {
                    assert_eq!(out.len(), 4, "byte {:#04x}", byte);
                    assert_eq!(out[2], table::frame(FIGURES_SHIFT));
                }
                _ => assert_eq!(out.len(), 3, "byte {:#04x}", byte),
            }
            assert_eq!(*out.last().unwrap(), table::frame(entry.code));
        }
    }

    #[test]
    fn test_no_redundant_shifts() {
        let out = encode_vec(b"HELLO");
        assert_eq!(out.len(), 2 + 5);
        assert!(!out[2..].contains(&LTRS));

        let out = encode_vec(b"12345");
        assert_eq!(out.len(), 2 + 1 + 5);
        assert_eq!(out.iter().filter(|&&b| b == FIGS).count(), 1);
    }

    #[test]
    fn test_space_forces_letters() {
        let out = encode_vec(b"5 A");
        assert_eq!(
            out,
            vec![
                LTRS,
                LTRS,
                FIGS,
                table::frame(0x10),
                table::frame(0x04),
                table::frame(0x03),
            ]
        );

        // after a space, figures need a fresh shift
        let out = encode_vec(b"5 5");
        assert_eq!(out.iter().filter(|&&b| b == FIGS).count(), 2);
    }

    #[test]
    fn test_carriage_return_keeps_case() {
        let out = encode_vec(b"1\r2");
        assert_eq!(out.iter().filter(|&&b| b == FIGS).count(), 1);
        assert_eq!(out.len(), 2 + 1 + 3);
    }

    #[test]
    fn test_shift_back_to_letters() {
        let out = encode_vec(b"A1B");
        assert_eq!(
            out,
            vec![
                LTRS,
                LTRS,
                table::frame(0x03),
                FIGS,
                table::frame(0x17),
                LTRS,
                table::frame(0x19),
            ]
        );
    }

    #[test]
    fn test_skips_unknown() {
        assert_eq!(encode_vec(b"A@B"), encode_vec(b"AB"));
        assert_eq!(encode_vec("Aé".as_bytes()), encode_vec(b"A"));
    }

    #[test]
    fn test_truncation_never_splits_shift() {
        let mut buf = [0u8; 3];
        // '5' needs FIGS + symbol, only one byte left
        assert_eq!(encode(&mut buf, b"5"), 2);
        assert_eq!(buf[..2], [LTRS, LTRS]);

        let mut buf = [0u8; 4];
        assert_eq!(encode(&mut buf, b"A5"), 3);
        assert_eq!(buf[2], table::frame(0x03));
    }

    #[test]
    fn test_preamble_does_not_fit() {
        let mut buf = [0xAAu8; 1];
        assert_eq!(encode(&mut buf, b"A"), 0);
        assert_eq!(buf, [0xAA]);
    }

    #[test]
    fn test_custom_preamble() {
        let encoder = BaudotEncoder::new(8);
        let encoded = encoder.encode(b"CQ", 64);
        assert_eq!(encoded.bitstream.len_bytes(), 10);
        assert!(encoded.bitstream.as_bytes()[..8].iter().all(|&b| b == LTRS));
        assert!(!encoded.is_truncated());
    }

    #[test]
    fn test_truncation_reported() {
        let encoded = BaudotEncoder::default().encode(b"ABCDEF", 5);
        assert_eq!(encoded.bitstream.len_bytes(), 5);
        assert_eq!(encoded.consumed, 3);
        assert!(encoded.is_truncated());
    }

    #[test]
    fn test_framing_invariant() {
        let out = encode_vec(b"THE QUICK BROWN FOX 1234567890 ?!&/.,=+-()");
        for byte in out {
            assert_eq!(byte & 0x01, 0);
            assert_eq!(byte & 0xC0, 0xC0);
        }
    }
}

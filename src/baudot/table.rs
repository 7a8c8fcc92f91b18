//! ITA2 code table.
//!
//! Built once on first use from the rows below. Letters are registered under
//! both their upper and lower case byte so either case encodes to the same code.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::utils::consts::{DATA_MASK, FIGURES_SHIFT, LETTERS_SHIFT, START_BITS, STOP_BITS};

/// Teleprinter case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shift {
    Letters,
    Figures,
}

impl Shift {
    /// Code that switches a receiver into this case
    pub fn shift_code(self) -> u8 {
        match self {
            Shift::Letters => LETTERS_SHIFT,
            Shift::Figures => FIGURES_SHIFT,
        }
    }

    /// Inverse of [`Shift::shift_code`]
    pub fn from_shift_code(code: u8) -> Option<Shift> {
        match code {
            LETTERS_SHIFT => Some(Shift::Letters),
            FIGURES_SHIFT => Some(Shift::Figures),
            _ => None,
        }
    }
}

/// Which case(s) a character can be sent in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftRequirement {
    Letters,
    Figures,
    /// Same code in either case (space, CR, LF, NUL)
    Both,
}

impl ShiftRequirement {
    pub fn allows(self, shift: Shift) -> bool {
        match self {
            ShiftRequirement::Both => true,
            ShiftRequirement::Letters => shift == Shift::Letters,
            ShiftRequirement::Figures => shift == Shift::Figures,
        }
    }

    /// The case to switch to when `allows` fails
    pub fn target(self) -> Shift {
        match self {
            ShiftRequirement::Figures => Shift::Figures,
            ShiftRequirement::Letters | ShiftRequirement::Both => Shift::Letters,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeEntry {
    /// 5-bit ITA2 code
    pub code: u8,
    pub shift: ShiftRequirement,
    /// Case forced after the character is sent
    pub shift_after: Option<Shift>,
}

/// (code, letters-case byte, figures-case byte)
const ROWS: [(u8, u8, u8); 26] = [
    (0x01, b'E', b'3'),
    (0x03, b'A', b'-'),
    (0x05, b'S', b'\''),
    (0x06, b'I', b'8'),
    (0x07, b'U', b'7'),
    // WRU / ENQ
    (0x09, b'D', 0x05),
    (0x0A, b'R', b'4'),
    // BEL
    (0x0B, b'J', 0x07),
    (0x0C, b'N', b','),
    (0x0D, b'F', b'!'),
    (0x0E, b'C', b':'),
    (0x0F, b'K', b'('),
    (0x10, b'T', b'5'),
    (0x11, b'Z', b'+'),
    (0x12, b'L', b')'),
    (0x13, b'W', b'2'),
    (0x14, b'H', b'#'),
    (0x15, b'Y', b'6'),
    (0x16, b'P', b'0'),
    (0x17, b'Q', b'1'),
    (0x18, b'O', b'9'),
    (0x19, b'B', b'?'),
    (0x1A, b'G', b'&'),
    (0x1C, b'M', b'.'),
    (0x1D, b'X', b'/'),
    (0x1E, b'V', b'='),
];

/// Characters valid in either case.
const BOTH: [(u8, u8, Option<Shift>); 4] = [
    (0x00, b'\0', None),
    (0x02, b'\n', None),
    // space always leaves the machine in letters
    (0x04, b' ', Some(Shift::Letters)),
    (0x08, b'\r', None),
];

fn init_code_table() -> HashMap<u8, CodeEntry> {
    let mut table = HashMap::new();

    for &(code, byte, shift_after) in BOTH.iter() {
        table.insert(
            byte,
            CodeEntry {
                code,
                shift: ShiftRequirement::Both,
                shift_after,
            },
        );
    }

    for &(code, letter, figure) in ROWS.iter() {
        let entry = CodeEntry {
            code,
            shift: ShiftRequirement::Letters,
            shift_after: None,
        };
        table.insert(letter.to_ascii_uppercase(), entry);
        table.insert(letter.to_ascii_lowercase(), entry);
        table.insert(
            figure,
            CodeEntry {
                code,
                shift: ShiftRequirement::Figures,
                shift_after: None,
            },
        );
    }

    table
}

fn init_decode_table() -> HashMap<(Shift, u8), u8> {
    let mut table = HashMap::new();
    for &(code, byte, _) in BOTH.iter() {
        table.insert((Shift::Letters, code), byte);
        table.insert((Shift::Figures, code), byte);
    }
    for &(code, letter, figure) in ROWS.iter() {
        table.insert((Shift::Letters, code), letter);
        table.insert((Shift::Figures, code), figure);
    }
    table
}

lazy_static! {
    static ref CODE_TABLE: HashMap<u8, CodeEntry> = init_code_table();
    static ref DECODE_TABLE: HashMap<(Shift, u8), u8> = init_decode_table();
}

/// Table entry for an input byte, `None` if ITA2 cannot represent it.
pub fn lookup(byte: u8) -> Option<CodeEntry> {
    CODE_TABLE.get(&byte).copied()
}

/// Character printed for `code` in case `shift`.
///
/// Letters come back upper case; the shift codes themselves have no character.
pub fn character(code: u8, shift: Shift) -> Option<u8> {
    DECODE_TABLE.get(&(shift, code)).copied()
}

/// All bytes the encoder accepts.
pub fn supported_bytes() -> impl Iterator<Item = u8> {
    let mut bytes: Vec<u8> = CODE_TABLE.keys().copied().collect();
    bytes.sort_unstable();
    bytes.into_iter()
}

/// Wrap a 5-bit code in start-stop framing: bit 0 start (0), bits 1-5 data
/// LSB first, bits 6-7 stop (1).
pub fn frame(code: u8) -> u8 {
    STOP_BITS | ((code << 1) & DATA_MASK) | START_BITS
}

/// Strip framing, `None` if the start or stop bits are wrong.
pub fn unframe(symbol: u8) -> Option<u8> {
    let start_ok = symbol & 0x01 == START_BITS;
    let stop_ok = symbol & STOP_BITS == STOP_BITS;
    if start_ok && stop_ok {
        Some((symbol & DATA_MASK) >> 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_letters() {
        for letter in b'A'..=b'Z' {
            let upper = lookup(letter).unwrap();
            let lower = lookup(letter.to_ascii_lowercase()).unwrap();
            assert_eq!(upper, lower);
            assert_eq!(upper.shift, ShiftRequirement::Letters);
        }
    }

    #[test]
    fn test_figures_share_codes_with_letters() {
        assert_eq!(lookup(b'3').unwrap().code, lookup(b'E').unwrap().code);
        assert_eq!(lookup(b'5').unwrap().code, 0x10);
        assert_eq!(lookup(b'5').unwrap().shift, ShiftRequirement::Figures);
    }

    #[test]
    fn test_unrepresentable() {
        assert!(lookup(b'@').is_none());
        assert!(lookup(b'~').is_none());
        assert!(lookup(0xFF).is_none());
    }

    #[test]
    fn test_space_returns_to_letters() {
        let space = lookup(b' ').unwrap();
        assert_eq!(space.shift, ShiftRequirement::Both);
        assert_eq!(space.shift_after, Some(Shift::Letters));
        assert_eq!(lookup(b'\r').unwrap().shift_after, None);
    }

    #[test]
    fn test_frame_layout() {
        // LTRS: 0x1F -> start 0, data 11111, stop 11
        assert_eq!(frame(LETTERS_SHIFT), 0xFE);
        assert_eq!(frame(FIGURES_SHIFT), 0xF6);
        assert_eq!(frame(0x00), 0xC0);
    }

    #[test]
    fn test_unframe_every_code() {
        for byte in supported_bytes() {
            let entry = lookup(byte).unwrap();
            let symbol = frame(entry.code);
            assert_eq!(symbol & 0x01, 0);
            assert_eq!(symbol & 0xC0, 0xC0);
            assert_eq!(unframe(symbol), Some(entry.code));
        }
        assert_eq!(unframe(0x01), None);
        assert_eq!(unframe(0x7E), None);
    }

    #[test]
    fn test_character_round_trip() {
        for byte in supported_bytes() {
            let entry = lookup(byte).unwrap();
            let shift = match entry.shift {
                ShiftRequirement::Figures => Shift::Figures,
                _ => Shift::Letters,
            };
            assert_eq!(character(entry.code, shift), Some(byte.to_ascii_uppercase()));
        }
        assert_eq!(character(LETTERS_SHIFT, Shift::Letters), None);
    }
}

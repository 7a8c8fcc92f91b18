/// Encoded message as transmitted: framed symbols, each byte sent bit 0 first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bitstream {
    bytes: Vec<u8>,
}

impl Bitstream {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len_bytes(&self) -> usize {
        self.bytes.len()
    }

    pub fn nbits(&self) -> usize {
        self.bytes.len() * 8
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bit `index` of the stream: bit `index % 8` of byte `index / 8`.
    pub fn bit(&self, index: usize) -> bool {
        self.bytes[index / 8] & (1 << (index & 7)) != 0
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.nbits()).map(move |i| self.bit(i))
    }
}

impl From<Vec<u8>> for Bitstream {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsb_first() {
        let stream = Bitstream::from_bytes(vec![0b1100_0001, 0x80]);
        assert_eq!(stream.nbits(), 16);
        let bits: Vec<bool> = stream.bits().collect();
        assert_eq!(
            &bits[..8],
            &[true, false, false, false, false, false, true, true]
        );
        assert!(!stream.bit(8));
        assert!(stream.bit(15));
    }

    #[test]
    fn test_empty() {
        let stream = Bitstream::default();
        assert!(stream.is_empty());
        assert_eq!(stream.nbits(), 0);
        assert_eq!(stream.bits().count(), 0);
    }
}

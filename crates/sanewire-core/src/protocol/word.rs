use serde::{Deserialize, Serialize};

use super::layout::WORD_LEN;

/// One protocol word: 32 bits, big-endian on the wire.
///
/// Callers pick the interpretation: array counts are signed, byte counts are
/// usually unsigned.
///
/// # Examples
/// ```
/// use sanewire_core::Word;
///
/// let word = Word::from_be_bytes([0xff, 0xff, 0xff, 0xfe]);
/// assert_eq!(word.as_i32(), -2);
/// assert_eq!(word.as_u32(), 0xffff_fffe);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(u32);

impl Word {
    pub const ZERO: Word = Word(0);

    pub fn from_be_bytes(bytes: [u8; WORD_LEN]) -> Self {
        Word(u32::from_be_bytes(bytes))
    }

    pub fn to_be_bytes(self) -> [u8; WORD_LEN] {
        self.0.to_be_bytes()
    }

    pub fn as_i32(self) -> i32 {
        self.0 as i32
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for Word {
    fn from(value: u32) -> Self {
        Word(value)
    }
}

impl From<i32> for Word {
    fn from(value: i32) -> Self {
        Word(value as u32)
    }
}

impl From<bool> for Word {
    fn from(value: bool) -> Self {
        Word(value as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::Word;

    #[test]
    fn decode_then_encode_is_identity() {
        let samples: [[u8; 4]; 6] = [
            [0, 0, 0, 0],
            [0, 0, 0, 1],
            [0x7f, 0xff, 0xff, 0xff],
            [0x80, 0, 0, 0],
            [0xff, 0xff, 0xff, 0xff],
            [0x12, 0x34, 0x56, 0x78],
        ];
        for bytes in samples {
            assert_eq!(Word::from_be_bytes(bytes).to_be_bytes(), bytes);
        }
    }

    #[test]
    fn big_endian_interpretation() {
        let word = Word::from_be_bytes([0x00, 0x00, 0x01, 0x02]);
        assert_eq!(word.as_u32(), 258);
        assert_eq!(word.as_i32(), 258);
    }

    #[test]
    fn signed_and_unsigned_views_share_bits() {
        let word = Word::from(-1i32);
        assert_eq!(word.as_u32(), u32::MAX);
        assert_eq!(Word::from(u32::MAX).as_i32(), -1);
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&Word::from(42u32)).unwrap();
        assert_eq!(json, "42");
    }
}

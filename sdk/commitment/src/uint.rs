//! 256-bit unsigned integers
//!
//! A thin wrapper over `alloy_primitives::U256` that fixes the text form to
//! strict decimal, so values survive JSON round trips without precision loss
//! and malformed input maps to [`EncodingError`].

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256 as Word;
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::EncodingError;

/// Unsigned 256-bit integer, packed as a 32-byte big-endian word
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct U256(Word);

impl U256 {
    pub const ZERO: Self = Self(Word::ZERO);
    pub const MAX: Self = Self(Word::MAX);

    /// Build from a 32-byte big-endian word
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(Word::from_be_bytes(bytes))
    }

    /// The packed 32-byte big-endian word
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0.to_be_bytes()
    }

    pub fn from_biguint(value: &BigUint) -> Result<Self, EncodingError> {
        let bits = value.bits();
        if bits > 256 {
            return Err(EncodingError::Overflow { bits });
        }
        let bytes = value.to_bytes_be();
        let mut word = [0u8; 32];
        word[32 - bytes.len()..].copy_from_slice(&bytes);
        Ok(Self::from_be_bytes(word))
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_be_bytes())
    }

    /// Number of significant bits (0 for zero)
    pub fn bits(&self) -> u64 {
        self.0.bit_len() as u64
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Addition that reports overflow past 256 bits as `None`
    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl FromStr for U256 {
    type Err = EncodingError;

    /// Parse a decimal string. Surrounding whitespace is ignored; signs,
    /// hex prefixes and separators are not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(EncodingError::Empty);
        }

        if let Some(digits) = input.strip_prefix('-') {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(EncodingError::Negative {
                    input: input.to_string(),
                });
            }
        }

        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EncodingError::NonNumeric {
                input: input.to_string(),
            });
        }

        match Word::from_str_radix(input, 10) {
            Ok(word) => Ok(Self(word)),
            // only overflow is left once the digits are checked
            Err(_) => {
                let bits = BigUint::parse_bytes(input.as_bytes(), 10)
                    .map(|n| n.bits())
                    .unwrap_or(257);
                Err(EncodingError::Overflow { bits })
            }
        }
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        Self(Word::from(value))
    }
}

impl From<u128> for U256 {
    fn from(value: u128) -> Self {
        Self(Word::from(value))
    }
}

impl From<Word> for U256 {
    fn from(value: Word) -> Self {
        Self(value)
    }
}

impl From<U256> for Word {
    fn from(value: U256) -> Self {
        value.0
    }
}

impl TryFrom<&BigUint> for U256 {
    type Error = EncodingError;

    fn try_from(value: &BigUint) -> Result<Self, Self::Error> {
        Self::from_biguint(value)
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256({})", self.0)
    }
}

impl fmt::LowerHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode(self.to_be_bytes()))
    }
}

impl Serialize for U256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(DecimalVisitor)
    }
}

/// Accepts decimal strings only; JSON numbers are rejected so a value can
/// never pass through an `f64` on the way in.
struct DecimalVisitor;

impl de::Visitor<'_> for DecimalVisitor {
    type Value = U256;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal string holding an unsigned 256-bit integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
        v.parse().map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_POW_256: &str =
        "115792089237316195423570985008687907853269984665640564039457584007913129639936";
    const U256_MAX: &str =
        "115792089237316195423570985008687907853269984665640564039457584007913129639935";

    #[test]
    fn test_parse_decimal() {
        let v: U256 = "4000000000000000".parse().unwrap();
        assert_eq!(v, U256::from(4_000_000_000_000_000u64));
        assert_eq!(v.to_string(), "4000000000000000");
    }

    #[test]
    fn test_parse_extremes() {
        assert_eq!("0".parse::<U256>().unwrap(), U256::ZERO);
        assert_eq!(U256_MAX.parse::<U256>().unwrap(), U256::MAX);
        assert_eq!(U256::MAX.to_string(), U256_MAX);
    }

    #[test]
    fn test_parse_overflow() {
        let err = TWO_POW_256.parse::<U256>().unwrap_err();
        assert_eq!(err, EncodingError::Overflow { bits: 257 });
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!("".parse::<U256>().unwrap_err(), EncodingError::Empty);
        assert_eq!("   ".parse::<U256>().unwrap_err(), EncodingError::Empty);
        assert!(matches!(
            "-5".parse::<U256>().unwrap_err(),
            EncodingError::Negative { .. }
        ));
        assert!(matches!(
            "12ab".parse::<U256>().unwrap_err(),
            EncodingError::NonNumeric { .. }
        ));
        assert!(matches!(
            "0x10".parse::<U256>().unwrap_err(),
            EncodingError::NonNumeric { .. }
        ));
        assert!(matches!(
            "+7".parse::<U256>().unwrap_err(),
            EncodingError::NonNumeric { .. }
        ));
        assert!(matches!(
            "1.5".parse::<U256>().unwrap_err(),
            EncodingError::NonNumeric { .. }
        ));
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(" 52555232\n".parse::<U256>().unwrap(), U256::from(52555232u64));
    }

    #[test]
    fn test_be_layout() {
        let v = U256::from(0x0102u64);
        let bytes = v.to_be_bytes();
        assert_eq!(bytes[30], 0x01);
        assert_eq!(bytes[31], 0x02);
        assert!(bytes[..30].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(U256::from(2u64) > U256::from(1u64));
        assert!(U256::from(u128::MAX) > U256::from(u64::MAX));
    }

    #[test]
    fn test_checked_add() {
        let one = U256::from(1u64);
        assert_eq!(one.checked_add(&one), Some(U256::from(2u64)));
        assert_eq!(U256::MAX.checked_add(&one), None);
    }

    #[test]
    fn test_serde_decimal_string() {
        let v: U256 = U256_MAX.parse().unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, format!("\"{}\"", U256_MAX));
        let back: U256 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_serde_rejects_numbers() {
        assert!(serde_json::from_str::<U256>("12345").is_err());
        assert!(serde_json::from_str::<U256>("\"-1\"").is_err());
    }

    #[test]
    fn test_alloy_word_round_trip() {
        let v = U256::from(52_555_232u64);
        let word: Word = v.into();
        assert_eq!(word, Word::from(52_555_232u64));
        assert_eq!(U256::from(word), v);
        assert_eq!(U256::MAX.bits(), 256);
        assert_eq!(U256::ZERO.bits(), 0);
    }

    #[test]
    fn test_biguint_bridge() {
        let v: U256 = U256_MAX.parse().unwrap();
        assert_eq!(U256::from_biguint(&v.to_biguint()).unwrap(), v);
        let too_big = v.to_biguint() + 1u32;
        assert_eq!(
            U256::from_biguint(&too_big).unwrap_err(),
            EncodingError::Overflow { bits: 257 }
        );
    }

    #[test]
    fn test_hex_format() {
        let v = U256::from(255u64);
        let s = format!("{:#x}", v);
        assert!(s.starts_with("0x"));
        assert!(s.ends_with("ff"));
        assert_eq!(s.len(), 66);
    }
}

use std::fmt;
use std::str::FromStr;

use alloy_primitives::B256;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::uint::U256;

/// A 32-byte Keccak-256 digest (commitment or nullifier)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash256(pub B256);

impl Hash256 {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(B256::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0.0
    }

    /// `0x`-prefixed lowercase hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.as_bytes()))
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl From<B256> for Hash256 {
    fn from(value: B256) -> Self {
        Self(value)
    }
}

impl From<Hash256> for B256 {
    fn from(value: Hash256) -> Self {
        value.0
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl FromStr for Hash256 {
    type Err = hex::FromHexError;

    /// Accepts 64 hex digits with or without a `0x` prefix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);
        let mut out = [0u8; 32];
        hex::decode_to_slice(digits, &mut out)?;
        Ok(Self::from_bytes(out))
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| de::Error::custom(format!("invalid 32-byte hex digest: {}", e)))
    }
}

/// Keccak-256 (the pre-standard padding, as used by the EVM)
pub fn keccak256(data: &[u8]) -> Hash256 {
    Hash256(alloy_primitives::keccak256(data))
}

/// Tightly packed 32-byte big-endian words, in argument order.
pub fn encode_packed(words: &[U256]) -> Vec<u8> {
    let mut out = Vec::with_capacity(words.len() * 32);
    for word in words {
        out.extend_from_slice(&word.to_be_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_empty_vector() {
        assert_eq!(
            keccak256(&[]).to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_b256_conversions() {
        let h = keccak256(b"darkpool");
        let b: B256 = h.into();
        assert_eq!(b, alloy_primitives::keccak256(b"darkpool"));
        assert_eq!(Hash256::from(b), h);
        assert_eq!(h.as_bytes(), &b.0);
    }

    #[test]
    fn test_encode_packed_layout() {
        let packed = encode_packed(&[U256::from(1u64), U256::from(2u64)]);
        assert_eq!(packed.len(), 64);
        assert_eq!(packed[31], 1);
        assert_eq!(packed[63], 2);
        assert!(packed[..31].iter().all(|b| *b == 0));
        assert!(packed[32..63].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_hex_parse_with_and_without_prefix() {
        let h = keccak256(b"darkpool");
        let with: Hash256 = h.to_hex().parse().unwrap();
        let without: Hash256 = h.to_hex()[2..].parse().unwrap();
        assert_eq!(with, h);
        assert_eq!(without, h);
    }

    #[test]
    fn test_hex_parse_rejects_wrong_length() {
        assert!("0x1234".parse::<Hash256>().is_err());
        assert!("zz".repeat(32).parse::<Hash256>().is_err());
    }
}

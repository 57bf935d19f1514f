//! Salt generation
//!
//! The salt is the commitment's only secret. Its entropy is a security
//! parameter: anyone who can enumerate the salt space can open a public
//! commitment, so policies under [`MIN_SALT_BITS`] are refused.

use rand_core::{CryptoRng, OsRng, TryRngCore};

use crate::error::{CommitmentError, Result};
use crate::uint::U256;

pub const MIN_SALT_BITS: u16 = 128;
pub const MAX_SALT_BITS: u16 = 256;
pub const DEFAULT_SALT_BITS: u16 = 256;

/// How many random bits a fresh salt carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaltPolicy {
    bits: u16,
}

impl SaltPolicy {
    pub fn new(bits: u16) -> Result<Self> {
        if bits < MIN_SALT_BITS {
            return Err(CommitmentError::WeakSaltPolicy {
                bits,
                min: MIN_SALT_BITS,
            });
        }
        if bits > MAX_SALT_BITS {
            return Err(CommitmentError::OversizedSaltPolicy { bits });
        }
        Ok(Self { bits })
    }

    pub fn bits(&self) -> u16 {
        self.bits
    }

    /// Draw a fresh salt from the operating system CSPRNG
    pub fn generate(&self) -> Result<U256> {
        let mut word = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut word)
            .map_err(|e| CommitmentError::Entropy(e.to_string()))?;
        Ok(self.mask(word))
    }

    /// Draw a fresh salt from a caller-supplied CSPRNG
    pub fn generate_with<R: CryptoRng + ?Sized>(&self, rng: &mut R) -> U256 {
        let mut word = [0u8; 32];
        rng.fill_bytes(&mut word);
        self.mask(word)
    }

    /// Clear every bit above `bits`
    fn mask(&self, mut word: [u8; 32]) -> U256 {
        let excess = (MAX_SALT_BITS - self.bits) as usize;
        let whole = excess / 8;
        word[..whole].fill(0);
        let partial = excess % 8;
        if partial > 0 {
            word[whole] &= 0xff >> partial;
        }
        U256::from_be_bytes(word)
    }
}

impl Default for SaltPolicy {
    fn default() -> Self {
        Self {
            bits: DEFAULT_SALT_BITS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::RngCore;

    /// Emits 0xff forever, so masking is the only thing shaping the output
    struct SaturatedRng;

    impl RngCore for SaturatedRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0xff);
        }
    }

    impl CryptoRng for SaturatedRng {}

    #[test]
    fn test_rejects_weak_policy() {
        // 32 bits is roughly the observed narrow sampling range
        let err = SaltPolicy::new(32).unwrap_err();
        assert_eq!(err, CommitmentError::WeakSaltPolicy { bits: 32, min: 128 });
        assert!(SaltPolicy::new(127).is_err());
        assert!(SaltPolicy::new(128).is_ok());
    }

    #[test]
    fn test_rejects_oversized_policy() {
        assert!(matches!(
            SaltPolicy::new(257),
            Err(CommitmentError::OversizedSaltPolicy { bits: 257 })
        ));
    }

    #[test]
    fn test_mask_exact_width() {
        for bits in [128u16, 130, 160, 255, 256] {
            let policy = SaltPolicy::new(bits).unwrap();
            let salt = policy.generate_with(&mut SaturatedRng);
            assert_eq!(salt.bits(), bits as u64, "policy {}", bits);
        }
    }

    #[test]
    fn test_generate_within_policy() {
        let policy = SaltPolicy::new(160).unwrap();
        for _ in 0..16 {
            assert!(policy.generate().unwrap().bits() <= 160);
        }
    }

    #[test]
    fn test_fresh_salts_differ() {
        let policy = SaltPolicy::default();
        let a = policy.generate().unwrap();
        let b = policy.generate().unwrap();
        assert_ne!(a, b);
    }
}

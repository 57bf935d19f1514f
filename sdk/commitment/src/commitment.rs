//! Swap commitments
//!
//! ```text
//! Commitment = keccak256(amount || min_out || salt)   (3 x 32-byte words)
//! Nullifier  = keccak256(salt)                        (1 x 32-byte word)
//! ```
//!
//! The salt is the only secret in the pre-image. Losing it makes the
//! committed funds unrevealable.

use crate::error::{CommitmentError, Result};
use crate::hash::{Hash256, encode_packed, keccak256};
use crate::uint::U256;

/// commitment = keccak256(amount || min_out || salt)
pub fn compute_commitment(amount: &U256, min_out: &U256, salt: &U256) -> Hash256 {
    keccak256(&encode_packed(&[*amount, *min_out, *salt]))
}

/// nullifier = keccak256(salt)
pub fn compute_nullifier(salt: &U256) -> Hash256 {
    keccak256(&salt.to_be_bytes())
}

/// Recompute and compare. Prefer [`CommitmentOpening::verify`] on paths that
/// must not continue after a mismatch.
pub fn verify_commitment(
    candidate_salt: &U256,
    amount: &U256,
    min_out: &U256,
    expected: &Hash256,
) -> bool {
    compute_commitment(amount, min_out, candidate_salt) == *expected
}

/// Validate a salt typed in by the user against a known commitment.
///
/// Malformed text fails with [`CommitmentError::Encoding`]; a well-formed salt
/// that does not open the commitment fails with [`CommitmentError::Mismatch`].
pub fn check_salt_input(
    raw: &str,
    amount: &U256,
    min_out: &U256,
    expected: &Hash256,
) -> Result<U256> {
    let salt: U256 = raw.parse()?;
    CommitmentOpening::new(*amount, *min_out, salt).verify(expected)?;
    Ok(salt)
}

/// The full pre-image of a commitment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitmentOpening {
    pub amount: U256,
    pub min_out: U256,
    pub salt: U256,
}

impl CommitmentOpening {
    pub fn new(amount: U256, min_out: U256, salt: U256) -> Self {
        Self {
            amount,
            min_out,
            salt,
        }
    }

    pub fn commitment(&self) -> Hash256 {
        compute_commitment(&self.amount, &self.min_out, &self.salt)
    }

    pub fn nullifier(&self) -> Hash256 {
        compute_nullifier(&self.salt)
    }

    /// Hard check: errors unless this opening reproduces `expected`
    pub fn verify(&self, expected: &Hash256) -> Result<()> {
        let computed = self.commitment();
        if computed != *expected {
            return Err(CommitmentError::Mismatch {
                expected: *expected,
                computed,
            });
        }
        Ok(())
    }

    /// Check both the commitment and the nullifier derived from this salt
    pub fn verify_pair(&self, commitment: &Hash256, nullifier: &Hash256) -> Result<()> {
        self.verify(commitment)?;
        let computed = self.nullifier();
        if computed != *nullifier {
            return Err(CommitmentError::NullifierMismatch {
                expected: *nullifier,
                computed,
            });
        }
        Ok(())
    }
}

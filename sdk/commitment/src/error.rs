use thiserror::Error;

use crate::hash::Hash256;

/// Malformed or out-of-range numeric input.
///
/// Raised before any hashing happens, so nothing reaches the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("empty numeric input")]
    Empty,

    #[error("negative value not allowed: {input}")]
    Negative { input: String },

    #[error("not a decimal integer: {input}")]
    NonNumeric { input: String },

    #[error("value needs {bits} bits, exceeds 256")]
    Overflow { bits: u64 },
}

/// Errors from building or opening a commitment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitmentError {
    #[error("malformed input: {0}")]
    Encoding(#[from] EncodingError),

    /// The salt does not open the known commitment with these parameters.
    #[error("salt does not match commitment: expected {expected}, computed {computed}")]
    Mismatch { expected: Hash256, computed: Hash256 },

    #[error("nullifier mismatch: expected {expected}, computed {computed}")]
    NullifierMismatch { expected: Hash256, computed: Hash256 },

    #[error("salt policy of {bits} bits is below the {min}-bit minimum")]
    WeakSaltPolicy { bits: u16, min: u16 },

    #[error("salt policy of {bits} bits exceeds the 256-bit word")]
    OversizedSaltPolicy { bits: u16 },

    #[error("entropy source failed: {0}")]
    Entropy(String),
}

pub type Result<T> = std::result::Result<T, CommitmentError>;

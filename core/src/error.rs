use thiserror::Error;

use darkpool_commitment::{CommitmentError, Hash256};

use crate::gateway::GatewayError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend: {0}")]
    Io(#[from] std::io::Error),

    /// Wrong field types, missing or unknown fields
    #[error("malformed commitment record: {0}")]
    MalformedRecord(String),

    /// Parses, but the stored hashes do not recompute from the stored opening
    #[error("inconsistent commitment record: {0}")]
    InconsistentRecord(CommitmentError),

    #[error("a commitment is already pending: {commitment}")]
    PendingCommitmentExists { commitment: Hash256 },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Commitment(#[from] CommitmentError),

    #[error("no pending commitment")]
    NoPendingCommitment,

    #[error("reveal opens at block {reveal_block}, chain is at {current}")]
    RevealTooEarly { current: u64, reveal_block: u64 },

    /// Passed through untouched; never retried
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

pub type Result<T> = std::result::Result<T, ClientError>;

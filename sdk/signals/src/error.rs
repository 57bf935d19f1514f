use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// Signal list length differs from the circuit's declared count
    #[error("circuit '{layout}' declares {expected} public signals, got {got}")]
    CountMismatch {
        layout: String,
        expected: usize,
        got: usize,
    },

    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),

    #[error("unknown signal name: {0}")]
    UnknownSignal(String),

    #[error("signal name declared twice: {0}")]
    DuplicateSignal(String),
}

pub type Result<T> = std::result::Result<T, SignalError>;

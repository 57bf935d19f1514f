use thiserror::Error;

use darkpool_commitment::EncodingError;
use darkpool_signals::SignalError;

#[derive(Error, Debug)]
pub enum ProverError {
    #[error(transparent)]
    Signals(#[from] SignalError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("malformed proof: {0}")]
    MalformedProof(String),

    #[error("invalid {what} point: {reason}")]
    InvalidPoint { what: &'static str, reason: String },

    #[error("value {value} is not a canonical field element")]
    FieldOverflow { value: String },

    #[error("verification key: {0}")]
    VerificationKey(String),

    #[error("verification key expects {expected} public inputs, got {got}")]
    InputCount { expected: usize, got: usize },

    #[error("proof verification failed")]
    VerificationFailed,

    #[error("public input '{name}' came back as {returned}, supplied {supplied}")]
    PublicInputDrift {
        name: String,
        supplied: String,
        returned: String,
    },

    #[error("missing circuit input: {0}")]
    MissingInput(String),

    #[error("undeclared circuit input: {0}")]
    UnknownInput(String),

    #[error("circuit input given twice: {0}")]
    DuplicateInput(String),

    #[error("malformed calldata: {0}")]
    MalformedCalldata(String),

    /// The external proving tool failed; message is the tool's own output
    #[error("{tool} failed: {message}")]
    External { tool: String, message: String },

    #[error("proving timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProverError>;

//! The client-held secret for one pending commitment
//!
//! JSON form (all 256-bit integers as decimal strings):
//!
//! ```json
//! {
//!   "commitment": "0x…", "nullifier": "0x…",
//!   "salt": "…", "amount": "…", "minOut": "…",
//!   "fromAsset": "…", "toAsset": "…", "revealBlock": 123
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use darkpool_commitment::{CommitmentOpening, Hash256, U256};

use crate::error::{StoreError, StoreResult};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommitmentRecord {
    pub commitment: Hash256,
    pub nullifier: Hash256,
    pub salt: U256,
    pub amount: U256,
    pub min_out: U256,
    pub from_asset: String,
    pub to_asset: String,
    /// First block at which the reveal may be submitted
    pub reveal_block: u64,
}

impl CommitmentRecord {
    /// Derive commitment and nullifier from the opening
    pub fn new(
        opening: CommitmentOpening,
        from_asset: impl Into<String>,
        to_asset: impl Into<String>,
        reveal_block: u64,
    ) -> Self {
        Self {
            commitment: opening.commitment(),
            nullifier: opening.nullifier(),
            salt: opening.salt,
            amount: opening.amount,
            min_out: opening.min_out,
            from_asset: from_asset.into(),
            to_asset: to_asset.into(),
            reveal_block,
        }
    }

    pub fn opening(&self) -> CommitmentOpening {
        CommitmentOpening::new(self.amount, self.min_out, self.salt)
    }

    /// Stored hashes must recompute from the stored opening
    pub fn validate(&self) -> StoreResult<()> {
        self.opening()
            .verify_pair(&self.commitment, &self.nullifier)
            .map_err(StoreError::InconsistentRecord)
    }

    pub fn to_json(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::MalformedRecord(e.to_string()))
    }

    /// Schema check, then consistency check
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let record: Self =
            serde_json::from_str(json).map_err(|e| StoreError::MalformedRecord(e.to_string()))?;
        record.validate()?;
        Ok(record)
    }
}

// The salt stays out of logs and panics.
impl fmt::Debug for CommitmentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitmentRecord")
            .field("commitment", &self.commitment)
            .field("nullifier", &self.nullifier)
            .field("salt", &"<redacted>")
            .field("amount", &self.amount)
            .field("min_out", &self.min_out)
            .field("from_asset", &self.from_asset)
            .field("to_asset", &self.to_asset)
            .field("reveal_block", &self.reveal_block)
            .finish()
    }
}

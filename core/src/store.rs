use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::record::CommitmentRecord;
use crate::storage::{PENDING_COMMITMENT_KEY, StorageBackend};

/// Single-slot store for the pending commitment.
///
/// At most one record is pending; saving over an occupied slot fails
/// instead of silently discarding the earlier salt.
#[derive(Debug)]
pub struct CommitmentStore<B> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> CommitmentStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, PENDING_COMMITMENT_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load and validate the pending record
    pub fn pending(&self) -> StoreResult<Option<CommitmentRecord>> {
        match self.backend.get(&self.key)? {
            Some(json) => Ok(Some(CommitmentRecord::from_json(&json)?)),
            None => Ok(None),
        }
    }

    pub fn has_pending(&self) -> StoreResult<bool> {
        Ok(self.backend.get(&self.key)?.is_some())
    }

    /// Persist a new pending record. Fails if the slot is occupied, even by
    /// a record that no longer parses; call [`Self::reset`] first.
    pub fn save_pending(&self, record: &CommitmentRecord) -> StoreResult<()> {
        record.validate()?;
        if let Some(existing) = self.pending()? {
            return Err(StoreError::PendingCommitmentExists {
                commitment: existing.commitment,
            });
        }
        self.backend.put(&self.key, &record.to_json()?)?;
        debug!(key = %self.key, commitment = %record.commitment, "pending commitment saved");
        Ok(())
    }

    /// Clear the slot after a successful reveal
    pub fn clear(&self) -> StoreResult<bool> {
        let removed = self.backend.delete(&self.key)?;
        debug!(key = %self.key, removed, "pending commitment cleared");
        Ok(removed)
    }

    /// Clear the slot unconditionally, valid or not.
    ///
    /// Does not and cannot retract a commitment already submitted on-chain.
    pub fn reset(&self) -> StoreResult<bool> {
        self.clear()
    }
}

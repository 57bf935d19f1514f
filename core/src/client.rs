//! Commit/reveal orchestration
//!
//! ```text
//!  commit:  salt ─► record ─► save_pending ─► submit_commit
//!  reveal:  pending ─► verify opening ─► block check ─► submit_reveal ─► clear
//! ```
//!
//! The record is persisted before the commit is submitted and kept when a
//! submission fails: a network error does not prove the transaction was
//! dropped, and without the salt the committed funds cannot be revealed.

use tracing::{info, warn};

use darkpool_commitment::{CommitmentOpening, Hash256, SaltPolicy, U256, check_salt_input};
use darkpool_prover::ProofCalldata;

use crate::error::{ClientError, Result, StoreError};
use crate::gateway::{RevealSubmission, SettlementGateway, TxId};
use crate::record::CommitmentRecord;
use crate::storage::StorageBackend;
use crate::store::CommitmentStore;

/// Blocks between commit and the earliest reveal
pub const DEFAULT_REVEAL_DELAY_BLOCKS: u64 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub amount: U256,
    pub min_out: U256,
    pub from_asset: String,
    pub to_asset: String,
}

#[derive(Debug, Clone)]
pub struct CommitReceipt {
    pub record: CommitmentRecord,
    pub tx: TxId,
}

#[derive(Debug, Clone)]
pub struct RevealReceipt {
    pub commitment: Hash256,
    pub nullifier: Hash256,
    pub tx: TxId,
}

/// A pre-image typed back in by the user after the stored record was lost
#[derive(Debug, Clone)]
pub struct ManualOpening {
    pub commitment: Hash256,
    pub salt: String,
    pub amount: U256,
    pub min_out: U256,
    pub from_asset: String,
    pub to_asset: String,
    pub reveal_block: u64,
}

pub struct DarkPoolClient<G, B> {
    gateway: G,
    store: CommitmentStore<B>,
    salt_policy: SaltPolicy,
    reveal_delay_blocks: u64,
}

impl<G: SettlementGateway, B: StorageBackend> DarkPoolClient<G, B> {
    pub fn new(gateway: G, store: CommitmentStore<B>) -> Self {
        Self {
            gateway,
            store,
            salt_policy: SaltPolicy::default(),
            reveal_delay_blocks: DEFAULT_REVEAL_DELAY_BLOCKS,
        }
    }

    pub fn with_salt_policy(mut self, policy: SaltPolicy) -> Self {
        self.salt_policy = policy;
        self
    }

    pub fn with_reveal_delay(mut self, blocks: u64) -> Self {
        self.reveal_delay_blocks = blocks;
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn store(&self) -> &CommitmentStore<B> {
        &self.store
    }

    pub fn pending(&self) -> Result<Option<CommitmentRecord>> {
        Ok(self.store.pending()?)
    }

    /// Draw a fresh salt, persist the record, then submit the commitment.
    pub async fn commit(&self, request: CommitRequest) -> Result<CommitReceipt> {
        if let Some(existing) = self.store.pending()? {
            return Err(StoreError::PendingCommitmentExists {
                commitment: existing.commitment,
            }
            .into());
        }

        let salt = self.salt_policy.generate()?;
        let opening = CommitmentOpening::new(request.amount, request.min_out, salt);

        let current = self.gateway.block_number().await?;
        let reveal_block = current.saturating_add(self.reveal_delay_blocks);
        let record = CommitmentRecord::new(
            opening,
            request.from_asset,
            request.to_asset,
            reveal_block,
        );

        self.store.save_pending(&record)?;

        let tx = match self.gateway.submit_commit(&record.commitment).await {
            Ok(tx) => tx,
            Err(e) => {
                warn!(
                    commitment = %record.commitment,
                    "commit submission failed, pending record kept: {}",
                    e
                );
                return Err(e.into());
            }
        };

        info!(
            commitment = %record.commitment,
            reveal_block,
            tx = %tx,
            "commitment submitted"
        );
        Ok(CommitReceipt { record, tx })
    }

    /// Reveal the pending commitment. Refuses to submit anything unless the
    /// stored opening reproduces both hashes and the reveal block is reached.
    pub async fn reveal(&self, proof: Option<ProofCalldata>) -> Result<RevealReceipt> {
        let record = self
            .store
            .pending()?
            .ok_or(ClientError::NoPendingCommitment)?;

        record
            .opening()
            .verify_pair(&record.commitment, &record.nullifier)?;

        let current = self.gateway.block_number().await?;
        if current < record.reveal_block {
            return Err(ClientError::RevealTooEarly {
                current,
                reveal_block: record.reveal_block,
            });
        }

        let submission = RevealSubmission {
            commitment: record.commitment,
            nullifier: record.nullifier,
            amount: record.amount,
            min_out: record.min_out,
            salt: record.salt,
            from_asset: record.from_asset.clone(),
            to_asset: record.to_asset.clone(),
            proof,
        };

        let tx = match self.gateway.submit_reveal(&submission).await {
            Ok(tx) => tx,
            Err(e) => {
                warn!(
                    commitment = %record.commitment,
                    "reveal submission failed, pending record kept: {}",
                    e
                );
                return Err(e.into());
            }
        };

        // the reveal has landed; a stale record must not turn that into an error
        if let Err(e) = self.store.clear() {
            warn!(
                commitment = %record.commitment,
                tx = %tx,
                "revealed but failed to clear pending record, reset it manually: {}",
                e
            );
        }
        info!(
            commitment = %record.commitment,
            nullifier = %record.nullifier,
            tx = %tx,
            "commitment revealed"
        );
        Ok(RevealReceipt {
            commitment: record.commitment,
            nullifier: record.nullifier,
            tx,
        })
    }

    /// Rebuild the pending record from a manually re-entered salt.
    ///
    /// Malformed salt text and a salt that does not open the commitment fail
    /// with different errors; neither touches the store.
    pub fn restore_pending(&self, manual: ManualOpening) -> Result<CommitmentRecord> {
        let salt = check_salt_input(
            &manual.salt,
            &manual.amount,
            &manual.min_out,
            &manual.commitment,
        )?;
        let record = CommitmentRecord::new(
            CommitmentOpening::new(manual.amount, manual.min_out, salt),
            manual.from_asset,
            manual.to_asset,
            manual.reveal_block,
        );
        self.store.save_pending(&record)?;
        info!(commitment = %record.commitment, "pending commitment restored from manual entry");
        Ok(record)
    }

    /// Drop the pending record. An already-submitted commitment stays on-chain.
    pub fn reset(&self) -> Result<bool> {
        let removed = self.store.reset()?;
        if removed {
            warn!("pending commitment discarded; any on-chain commitment is unaffected");
        }
        Ok(removed)
    }
}

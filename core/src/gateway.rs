//! The on-chain side of commit/reveal
//!
//! Contract ABIs, signing and confirmation policy live behind this trait.
//! The client never retries a failed call: each submission may spend funds
//! and needs fresh confirmation from whoever drives the client.

use std::future::Future;

use thiserror::Error;

use darkpool_commitment::{Hash256, U256};
use darkpool_prover::ProofCalldata;

/// Transaction identifier as reported by the gateway
pub type TxId = String;

/// Wallet rejection, network error or contract revert, message preserved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GatewayError {
    pub message: String,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Everything a reveal call can carry: the opening in discrete form plus
/// optional packed proof calldata for the verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealSubmission {
    pub commitment: Hash256,
    pub nullifier: Hash256,
    pub amount: U256,
    pub min_out: U256,
    pub salt: U256,
    pub from_asset: String,
    pub to_asset: String,
    pub proof: Option<ProofCalldata>,
}

pub trait SettlementGateway: Send + Sync {
    /// Current chain height
    fn block_number(&self) -> impl Future<Output = Result<u64, GatewayError>> + Send;

    fn submit_commit(
        &self,
        commitment: &Hash256,
    ) -> impl Future<Output = Result<TxId, GatewayError>> + Send;

    fn submit_reveal(
        &self,
        reveal: &RevealSubmission,
    ) -> impl Future<Output = Result<TxId, GatewayError>> + Send;
}

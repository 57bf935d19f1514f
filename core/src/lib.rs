//! Dark-pool commit/reveal client
//!
//! ```text
//!  DarkPoolClient ── commit / reveal ──► SettlementGateway   (external)
//!        │
//!        │ one pending record
//!        ▼
//!  CommitmentStore ── get/put/delete ──► StorageBackend      (memory | file)
//! ```

pub mod client;
pub mod error;
pub mod gateway;
pub mod record;
pub mod storage;
pub mod store;

pub use client::{
    CommitReceipt, CommitRequest, DEFAULT_REVEAL_DELAY_BLOCKS, DarkPoolClient, ManualOpening,
    RevealReceipt,
};
pub use error::{ClientError, Result, StoreError, StoreResult};
pub use gateway::{GatewayError, RevealSubmission, SettlementGateway, TxId};
pub use record::CommitmentRecord;
pub use storage::{FileBackend, MemoryBackend, PENDING_COMMITMENT_KEY, StorageBackend};
pub use store::CommitmentStore;

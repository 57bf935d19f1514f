//! Key/value persistence behind the pending-commitment store

pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::StoreResult;

/// Fixed slot holding the single pending commitment
pub const PENDING_COMMITMENT_KEY: &str = "darkpool.pendingCommitment";

/// Decoupling the store from where bytes live
pub trait StorageBackend: Send + Sync {
    /// Returns `None` if the key was never written or has been deleted.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Returns whether a value was removed.
    fn delete(&self, key: &str) -> StoreResult<bool>;
}

impl<T: StorageBackend + ?Sized> StorageBackend for Box<T> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        (**self).delete(key)
    }
}

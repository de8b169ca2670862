//! Storage Backends
//!
//! Persistence layers the local cache runs over.

mod file;
mod memory;

use async_trait::async_trait;

use crate::cache::{StoreName, StoredRecord};
use crate::error::Result;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Key-value persistence partitioned by store.
///
/// Backends report failures; they never decide freshness. Expiration is
/// applied by `LocalCache` on top of whatever a backend returns.
#[async_trait]
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Inserts or replaces the record with the same key.
    async fn put(&self, store: StoreName, record: StoredRecord) -> Result<()>;

    async fn get(&self, store: StoreName, key: &str) -> Result<Option<StoredRecord>>;

    /// Removes a record. Returns whether one was present.
    async fn delete(&self, store: StoreName, key: &str) -> Result<bool>;

    /// Every record in the store, in no particular order.
    async fn scan(&self, store: StoreName) -> Result<Vec<StoredRecord>>;

    async fn clear(&self, store: StoreName) -> Result<()>;
}

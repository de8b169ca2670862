//! In-memory backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::StorageBackend;
use crate::cache::{StoreName, StoredRecord};
use crate::error::{CacheError, Result};

// == Memory Backend ==
/// HashMap-backed storage, optionally capped per store.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    stores: RwLock<HashMap<StoreName, HashMap<String, StoredRecord>>>,
    /// Maximum records per store; None = unlimited
    max_entries: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that refuses new keys once a store holds
    /// `max_entries` records.
    pub fn with_capacity_limit(max_entries: usize) -> Self {
        Self {
            stores: RwLock::new(HashMap::new()),
            max_entries: Some(max_entries),
        }
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn put(&self, store: StoreName, record: StoredRecord) -> Result<()> {
        let mut stores = self.stores.write().await;
        let entries = stores.entry(store).or_default();

        // Overwrites never count against the limit
        if let Some(limit) = self.max_entries {
            if !entries.contains_key(&record.key) && entries.len() >= limit {
                return Err(CacheError::QuotaExceeded { store, limit });
            }
        }

        entries.insert(record.key.clone(), record);
        Ok(())
    }

    async fn get(&self, store: StoreName, key: &str) -> Result<Option<StoredRecord>> {
        let stores = self.stores.read().await;
        Ok(stores.get(&store).and_then(|entries| entries.get(key)).cloned())
    }

    async fn delete(&self, store: StoreName, key: &str) -> Result<bool> {
        let mut stores = self.stores.write().await;
        Ok(stores
            .get_mut(&store)
            .map(|entries| entries.remove(key).is_some())
            .unwrap_or(false))
    }

    async fn scan(&self, store: StoreName) -> Result<Vec<StoredRecord>> {
        let stores = self.stores.read().await;
        Ok(stores
            .get(&store)
            .map(|entries| entries.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn clear(&self, store: StoreName) -> Result<()> {
        self.stores.write().await.remove(&store);
        Ok(())
    }
}

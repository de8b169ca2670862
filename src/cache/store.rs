//! Cache Store Module
//!
//! The local cache engine: typed reads and writes over named stores, with
//! per-store TTL expiration applied on top of a storage backend.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::{
    CacheRecord, CacheStats, Clock, Payload, StorageBackend, StoreName, StoredRecord, SystemClock,
    MAX_KEY_LENGTH,
};
use crate::error::{CacheError, Result};

// == Local Cache ==
/// Partitioned TTL cache shared across the client's features.
///
/// None of its operations fail: backend errors are logged, counted, and
/// surface as cache misses so callers fall back to the network.
#[derive(Debug)]
pub struct LocalCache {
    backend: Arc<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
    stats: Mutex<HashMap<StoreName, CacheStats>>,
}

impl LocalCache {
    // == Constructor ==
    /// Creates a cache over `backend` using wall-clock time.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_clock(backend, Arc::new(SystemClock))
    }

    pub fn with_clock(backend: Arc<dyn StorageBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            stats: Mutex::new(HashMap::new()),
        }
    }

    // == Init ==
    /// Startup hook: purges whatever expired while the process was down.
    pub async fn init(&self) -> usize {
        let removed = self.sweep_expired().await;
        info!(
            "Local cache ready on {} backend ({} stale records purged)",
            self.backend.name(),
            removed
        );
        removed
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // == Put ==
    /// Stores `record`, replacing any record with the same key.
    pub async fn put<T: Serialize>(&self, store: StoreName, record: CacheRecord<T>) {
        let now = self.now();
        if let Err(err) = self.write_json(store, record, now).await {
            self.swallow(store, "put", err).await;
        }
    }

    // == Put Many ==
    /// Stores a batch under one shared timestamp so the batch expires
    /// together. A failing record does not stop the rest.
    pub async fn put_many<T: Serialize>(&self, store: StoreName, records: Vec<CacheRecord<T>>) {
        let now = self.now();
        for record in records {
            if let Err(err) = self.write_json(store, record, now).await {
                self.swallow(store, "put_many", err).await;
            }
        }
    }

    async fn write_json<T: Serialize>(
        &self,
        store: StoreName,
        record: CacheRecord<T>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let payload = Payload::Json(serde_json::to_value(&record.payload)?);
        self.write(store, StoredRecord::new(record.key, payload, now))
            .await
    }

    pub(crate) async fn write(&self, store: StoreName, record: StoredRecord) -> Result<()> {
        validate_key(&record.key)?;
        self.backend.put(store, record).await
    }

    // == Get ==
    /// Returns the payload stored under `key` if it is still fresh.
    ///
    /// An expired record is deleted on the spot.
    pub async fn get<T: DeserializeOwned>(&self, store: StoreName, key: &str) -> Option<T> {
        self.get_with_ttl(store, key).await.map(|(payload, _)| payload)
    }

    /// Like [`get`](Self::get), also reporting how long the record stays
    /// fresh.
    pub async fn get_with_ttl<T: DeserializeOwned>(
        &self,
        store: StoreName,
        key: &str,
    ) -> Option<(T, Duration)> {
        let Some(record) = self.fresh_record(store, key).await else {
            debug!(store = %store, key, "Cache miss");
            self.with_stats(store, |s| s.record_miss()).await;
            return None;
        };
        let remaining = record.remaining(store.window(), self.now());
        let Payload::Json(value) = record.payload else {
            warn!(store = %store, key, "Blob record read as structured data");
            self.with_stats(store, |s| s.record_miss()).await;
            return None;
        };

        match serde_json::from_value(value) {
            Ok(payload) => {
                debug!(store = %store, key, "Cache hit");
                self.with_stats(store, |s| s.record_hit()).await;
                Some((payload, remaining))
            }
            Err(err) => {
                self.swallow(store, "decode", err.into()).await;
                self.with_stats(store, |s| s.record_miss()).await;
                None
            }
        }
    }

    /// Looks up `key` and enforces the store window, deleting the record
    /// when it has expired.
    pub(crate) async fn fresh_record(&self, store: StoreName, key: &str) -> Option<StoredRecord> {
        let record = match self.backend.get(store, key).await {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(err) => {
                self.swallow(store, "get", err).await;
                return None;
            }
        };

        if !record.is_expired(store.window(), self.now()) {
            return Some(record);
        }

        debug!(store = %store, key, "Evicting expired record on read");
        match self.backend.delete(store, key).await {
            Ok(_) => self.with_stats(store, |s| s.record_expired(1)).await,
            Err(err) => self.swallow(store, "delete", err).await,
        }
        None
    }

    // == Get All ==
    /// Every fresh payload in the store. Expired records are skipped but
    /// left for the sweep.
    pub async fn get_all<T: DeserializeOwned>(&self, store: StoreName) -> Vec<T> {
        self.collect_fresh(store, |_| true).await
    }

    // == Get By Index ==
    /// Fresh payloads whose `index` attribute equals `value`.
    ///
    /// Runs as a linear scan over the store; stores are bounded by what one
    /// device caches.
    pub async fn get_by_index<T: DeserializeOwned>(
        &self,
        store: StoreName,
        index: &str,
        value: &str,
    ) -> Vec<T> {
        if !store.indexes().iter().any(|declared| *declared == index) {
            warn!(store = %store, index, "Lookup on undeclared index");
            return Vec::new();
        }

        self.collect_fresh(store, |payload| {
            payload
                .get(index)
                .map(|field| index_matches(field, value))
                .unwrap_or(false)
        })
        .await
    }

    async fn collect_fresh<T, F>(&self, store: StoreName, keep: F) -> Vec<T>
    where
        T: DeserializeOwned,
        F: Fn(&Value) -> bool,
    {
        let records = match self.backend.scan(store).await {
            Ok(records) => records,
            Err(err) => {
                self.swallow(store, "scan", err).await;
                return Vec::new();
            }
        };

        let now = self.now();
        let window = store.window();
        let mut payloads = Vec::new();
        for record in records {
            if record.is_expired(window, now) {
                continue;
            }
            let Payload::Json(value) = record.payload else {
                continue;
            };
            if !keep(&value) {
                continue;
            }
            match serde_json::from_value(value) {
                Ok(payload) => payloads.push(payload),
                Err(err) => self.swallow(store, "decode", err.into()).await,
            }
        }
        payloads
    }

    // == Delete ==
    /// Removes a single record, fresh or not.
    pub async fn delete(&self, store: StoreName, key: &str) {
        if let Err(err) = self.backend.delete(store, key).await {
            self.swallow(store, "delete", err).await;
        }
    }

    // == Invalidate Prefix ==
    /// Removes every record whose key starts with `prefix`.
    ///
    /// Returns the number of records removed.
    pub async fn invalidate_prefix(&self, store: StoreName, prefix: &str) -> usize {
        let records = match self.backend.scan(store).await {
            Ok(records) => records,
            Err(err) => {
                self.swallow(store, "scan", err).await;
                return 0;
            }
        };

        let mut removed = 0;
        for record in records.iter().filter(|r| r.key.starts_with(prefix)) {
            match self.backend.delete(store, &record.key).await {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(err) => self.swallow(store, "delete", err).await,
            }
        }

        debug!(store = %store, prefix, removed, "Invalidated keys by prefix");
        removed
    }

    // == Clear ==
    /// Empties one store.
    pub async fn clear(&self, store: StoreName) {
        match self.backend.clear(store).await {
            Ok(()) => debug!(store = %store, "Store cleared"),
            Err(err) => self.swallow(store, "clear", err).await,
        }
    }

    // == Clear All ==
    /// Empties every store. Must complete before another session's data is
    /// shown.
    pub async fn clear_all(&self) {
        for store in StoreName::ALL {
            self.clear(store).await;
        }
        info!("All cache stores cleared");
    }

    // == Sweep Expired ==
    /// Removes every expired record from every store.
    ///
    /// Returns the number of records removed.
    pub async fn sweep_expired(&self) -> usize {
        let now = self.now();
        let mut total = 0;

        for store in StoreName::ALL {
            let records = match self.backend.scan(store).await {
                Ok(records) => records,
                Err(err) => {
                    self.swallow(store, "sweep", err).await;
                    continue;
                }
            };

            let window = store.window();
            let mut removed = 0;
            for record in records.iter().filter(|r| r.is_expired(window, now)) {
                match self.backend.delete(store, &record.key).await {
                    Ok(true) => removed += 1,
                    Ok(false) => {}
                    Err(err) => self.swallow(store, "sweep", err).await,
                }
            }

            if removed > 0 {
                debug!(store = %store, removed, "Swept expired records");
                self.with_stats(store, |s| s.record_expired(removed as u64))
                    .await;
            }
            total += removed;
        }

        total
    }

    // == Stats ==
    /// Counters for every store, with live entry counts.
    pub async fn stats(&self) -> Vec<(StoreName, CacheStats)> {
        let mut out = Vec::with_capacity(StoreName::ALL.len());
        for store in StoreName::ALL {
            let entries = match self.backend.scan(store).await {
                Ok(records) => records.len(),
                Err(err) => {
                    self.swallow(store, "scan", err).await;
                    0
                }
            };
            let mut stats = self
                .stats
                .lock()
                .await
                .get(&store)
                .cloned()
                .unwrap_or_default();
            stats.set_total_entries(entries);
            out.push((store, stats));
        }
        out
    }

    // == Error Handling ==
    /// Logs and counts a backend failure; the caller then proceeds as on a
    /// miss.
    pub(crate) async fn swallow(&self, store: StoreName, op: &str, err: CacheError) {
        warn!(store = %store, op, error = %err, "Cache operation failed");
        self.with_stats(store, |s| s.record_error()).await;
    }

    pub(crate) async fn with_stats(&self, store: StoreName, f: impl FnOnce(&mut CacheStats)) {
        let mut stats = self.stats.lock().await;
        f(stats.entry(store).or_default());
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidKey(format!(
            "key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

/// Compares an indexed attribute with a lookup value. Strings compare
/// directly; numbers and booleans by their JSON text.
fn index_matches(field: &Value, value: &str) -> bool {
    match field {
        Value::String(s) => s == value,
        Value::Number(_) | Value::Bool(_) => field.to_string() == value,
        _ => false,
    }
}

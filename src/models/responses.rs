//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheStats, StoreName};

/// Response body for GET /stores/:store/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub store: StoreName,
    pub key: String,
    /// The cached payload, without its envelope
    pub value: Value,
    /// Seconds until the record expires
    pub expires_in: i64,
}

impl GetResponse {
    pub fn new(store: StoreName, key: impl Into<String>, value: Value, expires_in: i64) -> Self {
        Self {
            store,
            key: key.into(),
            value,
            expires_in,
        }
    }
}

/// Response body for GET /stores/:store
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub store: StoreName,
    pub count: usize,
    pub values: Vec<Value>,
}

impl ListResponse {
    pub fn new(store: StoreName, values: Vec<Value>) -> Self {
        Self {
            store,
            count: values.len(),
            values,
        }
    }
}

/// Response body for DELETE /stores and DELETE /stores/:store
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Stores that were emptied
    pub stores: Vec<StoreName>,
}

impl ClearResponse {
    pub fn new(stores: Vec<StoreName>) -> Self {
        let names: Vec<&str> = stores.iter().map(|s| s.as_str()).collect();
        Self {
            message: format!("Cleared {}", names.join(", ")),
            stores,
        }
    }
}

/// Response body for POST /sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepResponse {
    /// Expired records removed
    pub removed: usize,
}

/// Statistics for one store.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatsResponse {
    pub store: StoreName,
    /// Expiration window in seconds
    pub window_seconds: i64,
    pub hits: u64,
    pub misses: u64,
    pub expired: u64,
    pub errors: u64,
    pub total_entries: usize,
    pub hit_rate: f64,
}

impl StoreStatsResponse {
    pub fn new(store: StoreName, stats: &CacheStats) -> Self {
        Self {
            store,
            window_seconds: store.window().num_seconds(),
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            errors: stats.errors,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub backend: String,
    pub stores: Vec<StoreStatsResponse>,
    /// All stores summed
    pub total: CacheStats,
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(backend: impl Into<String>, per_store: &[(StoreName, CacheStats)]) -> Self {
        let mut total = CacheStats::new();
        let stores = per_store
            .iter()
            .map(|(store, stats)| {
                total.absorb(stats);
                StoreStatsResponse::new(*store, stats)
            })
            .collect();
        let hit_rate = total.hit_rate();

        Self {
            backend: backend.into(),
            stores,
            total,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

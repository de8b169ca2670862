//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{LocalCache, StoreName};
use crate::error::ApiError;
use crate::models::{
    ClearResponse, GetResponse, HealthResponse, ListResponse, StatsResponse, SweepResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide local cache
    pub cache: Arc<LocalCache>,
}

impl AppState {
    pub fn new(cache: Arc<LocalCache>) -> Self {
        Self { cache }
    }
}

/// Parses a store name from the path, rejecting the blob store for
/// endpoints that return JSON payloads.
fn structured_store(name: &str) -> Result<StoreName, ApiError> {
    let store: StoreName = name.parse().map_err(ApiError::InvalidRequest)?;
    if store.holds_blobs() {
        return Err(ApiError::InvalidRequest(format!(
            "Store '{}' holds binary blobs",
            store
        )));
    }
    Ok(store)
}

/// Handler for GET /stores/:store
///
/// Lists every fresh payload in a structured store.
pub async fn list_handler(
    State(state): State<AppState>,
    Path(store): Path<String>,
) -> Result<Json<ListResponse>, ApiError> {
    let store = structured_store(&store)?;
    let values: Vec<Value> = state.cache.get_all(store).await;

    Ok(Json(ListResponse::new(store, values)))
}

/// Handler for GET /stores/:store/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path((store, key)): Path<(String, String)>,
) -> Result<Json<GetResponse>, ApiError> {
    let store = structured_store(&store)?;
    let (value, remaining) = state
        .cache
        .get_with_ttl::<Value>(store, &key)
        .await
        .ok_or_else(|| ApiError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(
        store,
        key,
        value,
        remaining.num_seconds(),
    )))
}

/// Handler for DELETE /stores/:store
pub async fn clear_store_handler(
    State(state): State<AppState>,
    Path(store): Path<String>,
) -> Result<Json<ClearResponse>, ApiError> {
    let store: StoreName = store.parse().map_err(ApiError::InvalidRequest)?;
    state.cache.clear(store).await;

    Ok(Json(ClearResponse::new(vec![store])))
}

/// Handler for DELETE /stores
///
/// Empties every store, as on logout.
pub async fn clear_all_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear_all().await;
    Json(ClearResponse::new(StoreName::ALL.to_vec()))
}

/// Handler for POST /sweep
pub async fn sweep_handler(State(state): State<AppState>) -> Json<SweepResponse> {
    let removed = state.cache.sweep_expired().await;
    Json(SweepResponse { removed })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    Json(StatsResponse::new(state.cache.backend_name(), &stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

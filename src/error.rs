//! Error types for the cache layer and its admin surface
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cache::StoreName;

// == Cache Error Enum ==
/// Errors raised by storage backends.
///
/// These never reach callers of `LocalCache`: they are logged and turned
/// into cache misses.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Persistence layer cannot be used
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Store has reached its entry limit
    #[error("Quota exceeded for store '{store}': limit of {limit} entries")]
    QuotaExceeded { store: StoreName, limit: usize },

    /// Key is empty or too long
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Blob larger than the cache accepts
    #[error("Payload too large: {size} bytes exceeds limit of {limit}")]
    PayloadTooLarge { size: usize, limit: usize },

    /// Payload could not be encoded or decoded
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem failure in a persistent backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for storage backends.
pub type Result<T> = std::result::Result<T, CacheError>;

// == Api Error Enum ==
/// Errors returned by the admin HTTP surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Key not present or expired
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Bad store name or unsupported operation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

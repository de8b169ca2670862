//! API Module
//!
//! Admin HTTP surface for inspecting and maintaining a running cache.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Per-store statistics
//! - `POST /sweep` - Purge expired records
//! - `DELETE /stores` - Clear every store
//! - `GET /stores/:store` - List fresh payloads in a store
//! - `DELETE /stores/:store` - Clear one store
//! - `GET /stores/:store/:key` - Read one fresh payload

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

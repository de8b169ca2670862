//! Social Cache - local data layer for a social-networking client
//!
//! A partitioned cache with per-store TTL expiration in front of a remote
//! backend, with cache-aware fetch wrappers for each client feature.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod features;
pub mod models;
pub mod remote;
pub mod tasks;

pub use api::AppState;
pub use cache::{LocalCache, StoreName};
pub use config::Config;
pub use features::SocialClient;
pub use tasks::spawn_sweep_task;

//! Configuration Module
//!
//! Loads process configuration from environment variables. Store expiration
//! windows are constants and deliberately absent here.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::{FileBackend, MemoryBackend, StorageBackend};
use crate::error::Result;

/// Which persistence layer the cache runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    File,
}

impl BackendKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(BackendKind::Memory),
            "file" => Some(BackendKind::File),
            _ => None,
        }
    }
}

/// Process configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendKind,
    /// Root directory of the file backend
    pub cache_dir: PathBuf,
    /// Per-store entry limit for the memory backend; None = unlimited
    pub max_entries_per_store: Option<usize>,
    /// Seconds between background expiration sweeps
    pub sweep_interval: u64,
    /// Admin HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BACKEND` - `memory` or `file` (default: memory)
    /// - `CACHE_DIR` - File backend root (default: .social_cache)
    /// - `MAX_ENTRIES_PER_STORE` - Memory backend quota (default: unlimited)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - Admin HTTP port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env::var("CACHE_BACKEND")
                .ok()
                .and_then(|v| BackendKind::parse(&v))
                .unwrap_or(defaults.backend),
            cache_dir: env::var("CACHE_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            max_entries_per_store: env::var("MAX_ENTRIES_PER_STORE")
                .ok()
                .and_then(|v| v.parse().ok()),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.sweep_interval),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Opens the configured storage backend.
    pub async fn open_backend(&self) -> Result<Arc<dyn StorageBackend>> {
        let backend: Arc<dyn StorageBackend> = match self.backend {
            BackendKind::Memory => match self.max_entries_per_store {
                Some(limit) => Arc::new(MemoryBackend::with_capacity_limit(limit)),
                None => Arc::new(MemoryBackend::new()),
            },
            BackendKind::File => Arc::new(FileBackend::open(&self.cache_dir).await?),
        };
        Ok(backend)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::Memory,
            cache_dir: PathBuf::from(".social_cache"),
            max_entries_per_store: None,
            sweep_interval: 60,
            server_port: 3000,
        }
    }
}

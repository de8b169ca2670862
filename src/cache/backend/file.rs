//! File-backed backend.
//!
//! Layout: `<root>/<store>/<sha256(key)>.json`, one envelope per file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, warn};

use super::StorageBackend;
use crate::cache::{StoreName, StoredRecord};
use crate::error::Result;

const RECORD_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

/// Temp files older than this belong to a write that never completed.
const STALE_TEMP_AGE: Duration = Duration::from_secs(60);

// == File Backend ==
/// Persists each record as its own JSON file so the cache survives restarts.
#[derive(Debug)]
pub struct FileBackend {
    root: PathBuf,
    /// Distinguishes temp files of concurrent writers
    write_seq: AtomicU64,
}

impl FileBackend {
    // == Constructor ==
    /// Opens (creating if needed) a cache rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for store in StoreName::ALL {
            fs::create_dir_all(root.join(store.as_str())).await?;
        }
        debug!("File backend opened at {}", root.display());

        Ok(Self {
            root,
            write_seq: AtomicU64::new(0),
        })
    }

    fn store_dir(&self, store: StoreName) -> PathBuf {
        self.root.join(store.as_str())
    }

    fn record_path(&self, store: StoreName, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.store_dir(store)
            .join(format!("{}.{}", hex::encode(digest), RECORD_EXTENSION))
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn put(&self, store: StoreName, record: StoredRecord) -> Result<()> {
        let path = self.record_path(store, &record.key);
        let bytes = serde_json::to_vec(&record)?;

        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        let tmp = path.with_extension(format!("{}.{}", seq, TEMP_EXTENSION));
        let written = match fs::write(&tmp, bytes).await {
            Ok(()) => fs::rename(&tmp, &path).await,
            Err(err) => Err(err),
        };
        if let Err(err) = written {
            remove_if_present(&tmp).await;
            return Err(err.into());
        }
        Ok(())
    }

    async fn get(&self, store: StoreName, key: &str) -> Result<Option<StoredRecord>> {
        match fs::read(self.record_path(store, key)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, store: StoreName, key: &str) -> Result<bool> {
        match fs::remove_file(self.record_path(store, key)).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn scan(&self, store: StoreName) -> Result<Vec<StoredRecord>> {
        let mut records = Vec::new();
        let mut dir = match fs::read_dir(self.store_dir(store)).await {
            Ok(dir) => dir,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(records),
            Err(err) => return Err(err.into()),
        };

        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            match path.extension().and_then(|ext| ext.to_str()) {
                Some(RECORD_EXTENSION) => {}
                Some(TEMP_EXTENSION) => {
                    if is_stale(&entry).await {
                        debug!("Removing abandoned temp file {}", path.display());
                        remove_if_present(&path).await;
                    }
                    continue;
                }
                _ => continue,
            }

            // Removed by a concurrent delete between listing and reading
            let bytes = match fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => return Err(err.into()),
            };

            match serde_json::from_slice::<StoredRecord>(&bytes) {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!("Removing corrupt record {}: {}", path.display(), err);
                    remove_if_present(&path).await;
                }
            }
        }

        Ok(records)
    }

    async fn clear(&self, store: StoreName) -> Result<()> {
        let dir = self.store_dir(store);
        match fs::remove_dir_all(&dir).await {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        fs::create_dir_all(&dir).await?;
        Ok(())
    }
}

async fn is_stale(entry: &fs::DirEntry) -> bool {
    let Ok(metadata) = entry.metadata().await else {
        return false;
    };
    metadata
        .modified()
        .ok()
        .and_then(|modified| modified.elapsed().ok())
        .map(|age| age > STALE_TEMP_AGE)
        .unwrap_or(false)
}

/// Best-effort removal; a failure is logged and left for the next scan.
async fn remove_if_present(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => warn!("Failed to remove {}: {}", path.display(), err),
    }
}

//! Expiration Sweep Task
//!
//! Background task that periodically removes expired records from every
//! store, whether or not they are ever read again.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LocalCache;

/// Spawns a task that calls `sweep_expired` every `interval_secs` seconds.
///
/// The returned handle is aborted on shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(LocalCache::new(Arc::new(MemoryBackend::new())));
/// let sweep_handle = spawn_sweep_task(cache.clone(), 60);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(cache: Arc<LocalCache>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiration sweep with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep_expired().await;
            if removed > 0 {
                info!("Expiration sweep: removed {} expired records", removed);
            } else {
                debug!("Expiration sweep: no expired records found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheRecord, ManualClock, MemoryBackend, StorageBackend, StoreName};
    use chrono::Duration as ChronoDuration;

    fn cache_with_clock() -> (Arc<LocalCache>, Arc<MemoryBackend>, Arc<ManualClock>) {
        let backend = Arc::new(MemoryBackend::new());
        let clock = Arc::new(ManualClock::default());
        let cache = Arc::new(LocalCache::with_clock(backend.clone(), clock.clone()));
        (cache, backend, clock)
    }

    #[tokio::test]
    async fn test_sweep_task_removes_expired_records() {
        let (cache, backend, clock) = cache_with_clock();
        cache
            .put(StoreName::Messages, CacheRecord::new("m1", "hi"))
            .await;
        clock.advance(ChronoDuration::minutes(2));

        let handle = spawn_sweep_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        // Removed without ever being read
        assert!(backend.scan(StoreName::Messages).await.unwrap().is_empty());

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_fresh_records() {
        let (cache, backend, _clock) = cache_with_clock();
        cache
            .put(StoreName::Profiles, CacheRecord::new("u1", "Alice"))
            .await;

        let handle = spawn_sweep_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(backend.scan(StoreName::Profiles).await.unwrap().len(), 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let (cache, _, _) = cache_with_clock();

        let handle = spawn_sweep_task(cache, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}

//! Image Cache Module
//!
//! Blob-specialised get/put over the images store, keyed by source URL.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::cache::{LocalCache, Payload, StoreName, StoredRecord, MAX_BLOB_SIZE};
use crate::error::CacheError;
use crate::remote::BlobFetcher;

// == Image Source ==
/// Where the UI should load an image from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Bytes held locally
    Blob(Bytes),
    /// Neither the cache nor the network produced bytes; load the original
    /// URL directly
    Url(String),
}

impl ImageSource {
    pub fn is_local(&self) -> bool {
        matches!(self, ImageSource::Blob(_))
    }
}

impl LocalCache {
    // == Cache Image ==
    /// Stores an image blob under its source URL.
    pub async fn cache_image(&self, url: &str, blob: Bytes) {
        if blob.len() > MAX_BLOB_SIZE {
            let err = CacheError::PayloadTooLarge {
                size: blob.len(),
                limit: MAX_BLOB_SIZE,
            };
            self.swallow(StoreName::Images, "cache_image", err).await;
            return;
        }

        let record = StoredRecord::new(url, Payload::Blob(blob), self.now());
        if let Err(err) = self.write(StoreName::Images, record).await {
            self.swallow(StoreName::Images, "cache_image", err).await;
        }
    }

    // == Get Cached Image ==
    /// Returns the cached blob for `url` if it is still fresh.
    pub async fn get_cached_image(&self, url: &str) -> Option<Bytes> {
        match self.fresh_record(StoreName::Images, url).await {
            Some(StoredRecord {
                payload: Payload::Blob(bytes),
                ..
            }) => {
                self.with_stats(StoreName::Images, |s| s.record_hit()).await;
                Some(bytes)
            }
            Some(_) => {
                warn!(url, "Structured record found in image store");
                self.with_stats(StoreName::Images, |s| s.record_miss()).await;
                None
            }
            None => {
                self.with_stats(StoreName::Images, |s| s.record_miss()).await;
                None
            }
        }
    }

    // == Get Image With Cache ==
    /// Cache first, then network. When both fail the original URL is
    /// returned so the caller can still try to display it.
    pub async fn get_image_with_cache(&self, url: &str, fetcher: &dyn BlobFetcher) -> ImageSource {
        if let Some(bytes) = self.get_cached_image(url).await {
            return ImageSource::Blob(bytes);
        }

        match fetcher.fetch(url).await {
            Ok(bytes) => {
                self.cache_image(url, bytes.clone()).await;
                ImageSource::Blob(bytes)
            }
            Err(err) => {
                debug!(url, error = %err, "Image fetch failed, falling back to URL");
                ImageSource::Url(url.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheRecord, ManualClock, MemoryBackend};
    use crate::remote::{BackendError, Result};
    use async_trait::async_trait;
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const URL: &str = "https://cdn.example/avatars/u1.png";

    /// Serves fixed bytes and counts requests.
    #[derive(Default)]
    struct CountingFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl BlobFetcher for CountingFetcher {
        async fn fetch(&self, _url: &str) -> Result<Bytes> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Bytes::from_static(b"png-bytes"))
        }
    }

    struct OfflineFetcher;

    #[async_trait]
    impl BlobFetcher for OfflineFetcher {
        async fn fetch(&self, _url: &str) -> Result<Bytes> {
            Err(BackendError::Network("offline".to_string()))
        }
    }

    fn test_cache() -> (LocalCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let cache = LocalCache::with_clock(Arc::new(MemoryBackend::new()), clock.clone());
        (cache, clock)
    }

    #[tokio::test]
    async fn test_cache_and_get_image() {
        let (cache, clock) = test_cache();
        cache.cache_image(URL, Bytes::from_static(b"abc")).await;

        clock.advance(Duration::hours(23));
        assert_eq!(cache.get_cached_image(URL).await, Some(Bytes::from_static(b"abc")));

        clock.advance(Duration::hours(2));
        assert_eq!(cache.get_cached_image(URL).await, None);
    }

    #[tokio::test]
    async fn test_fetches_once_then_serves_from_cache() {
        let (cache, _) = test_cache();
        let fetcher = CountingFetcher::default();

        let first = cache.get_image_with_cache(URL, &fetcher).await;
        let second = cache.get_image_with_cache(URL, &fetcher).await;

        assert_eq!(first, ImageSource::Blob(Bytes::from_static(b"png-bytes")));
        assert_eq!(second, first);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_falls_back_to_url_when_offline() {
        let (cache, _) = test_cache();

        let source = cache.get_image_with_cache(URL, &OfflineFetcher).await;

        assert_eq!(source, ImageSource::Url(URL.to_string()));
        assert!(!source.is_local());
    }

    #[tokio::test]
    async fn test_oversized_blob_not_cached() {
        let (cache, _) = test_cache();
        let big = Bytes::from(vec![0u8; MAX_BLOB_SIZE + 1]);

        cache.cache_image(URL, big).await;
        assert!(cache.get_cached_image(URL).await.is_none());
    }

    #[tokio::test]
    async fn test_structured_record_is_not_an_image() {
        let (cache, _) = test_cache();
        cache.put(StoreName::Images, CacheRecord::new(URL, "text")).await;

        assert!(cache.get_cached_image(URL).await.is_none());
    }
}

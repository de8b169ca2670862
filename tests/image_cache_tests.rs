//! Integration Tests for image caching over real HTTP
//!
//! Serves an image from a local axum server and fetches it through
//! `HttpBlobFetcher`.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use social_cache::cache::{ImageSource, MemoryBackend};
use social_cache::remote::{BackendError, BlobFetcher, HttpBlobFetcher};
use social_cache::LocalCache;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";

// == Helper Functions ==

/// Starts a server on an ephemeral port. `/avatar.png` serves PNG bytes,
/// `/missing.png` answers 404. Returns the base URL and a hit counter.
async fn spawn_image_server() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/avatar.png",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                PNG
            }),
        )
        .route("/missing.png", get(|| async { StatusCode::NOT_FOUND }))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), hits)
}

fn memory_cache() -> LocalCache {
    LocalCache::new(Arc::new(MemoryBackend::new()))
}

// == Tests ==

#[tokio::test]
async fn test_image_fetched_once_then_cached() {
    let (base, hits) = spawn_image_server().await;
    let cache = memory_cache();
    let fetcher = HttpBlobFetcher::default();
    let url = format!("{}/avatar.png", base);

    let first = cache.get_image_with_cache(&url, &fetcher).await;
    let second = cache.get_image_with_cache(&url, &fetcher).await;

    assert_eq!(first, ImageSource::Blob(bytes::Bytes::from_static(PNG)));
    assert_eq!(second, first);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(
        cache.get_cached_image(&url).await.as_deref(),
        Some(PNG)
    );
}

#[tokio::test]
async fn test_http_error_status_is_backend_error() {
    let (base, _) = spawn_image_server().await;
    let fetcher = HttpBlobFetcher::default();

    let err = fetcher
        .fetch(&format!("{}/missing.png", base))
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::NotFound(_)));
}

#[tokio::test]
async fn test_unreachable_host_falls_back_to_url() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let cache = memory_cache();
    let url = format!("http://{}/avatar.png", addr);

    let source = cache
        .get_image_with_cache(&url, &HttpBlobFetcher::default())
        .await;

    assert_eq!(source, ImageSource::Url(url.clone()));
    assert!(cache.get_cached_image(&url).await.is_none());
}

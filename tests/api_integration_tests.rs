//! Integration Tests for the Admin API
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::{json, Value};
use social_cache::api::create_router;
use social_cache::cache::{CacheRecord, ManualClock, MemoryBackend};
use social_cache::{AppState, LocalCache, StoreName};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> (Router, Arc<LocalCache>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let cache = Arc::new(LocalCache::with_clock(
        Arc::new(MemoryBackend::new()),
        clock.clone(),
    ));
    let app = create_router(AppState::new(cache.clone()));
    (app, cache, clock)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Read Endpoints ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let (app, cache, _) = create_test_app();
    cache
        .put(
            StoreName::Profiles,
            CacheRecord::new("u1", json!({"id": "u1", "name": "Alice"})),
        )
        .await;

    let (status, json) = send(&app, "GET", "/stores/profiles/u1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["store"], "profiles");
    assert_eq!(json["key"], "u1");
    assert_eq!(json["value"], json!({"id": "u1", "name": "Alice"}));
    assert!(json["value"].get("stored_at").is_none());
    assert_eq!(json["expires_in"], 30 * 60);
}

#[tokio::test]
async fn test_get_endpoint_reports_remaining_window() {
    let (app, cache, clock) = create_test_app();
    cache
        .put(StoreName::Messages, CacheRecord::new("m1", json!({"id": "m1"})))
        .await;

    clock.advance(Duration::seconds(45));
    let (status, json) = send(&app, "GET", "/stores/messages/m1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["expires_in"], 15);
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let (app, _, _) = create_test_app();

    let (status, json) = send(&app, "GET", "/stores/profiles/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn test_list_endpoint_hides_expired_records() {
    let (app, cache, clock) = create_test_app();
    cache
        .put(StoreName::Messages, CacheRecord::new("m1", "old"))
        .await;
    clock.advance(Duration::seconds(50));
    cache
        .put(StoreName::Messages, CacheRecord::new("m2", "new"))
        .await;
    clock.advance(Duration::seconds(15));

    let (status, json) = send(&app, "GET", "/stores/messages").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["values"], json!(["new"]));
}

#[tokio::test]
async fn test_images_store_not_listable() {
    let (app, _, _) = create_test_app();

    let (status, _) = send(&app, "GET", "/stores/images").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == Maintenance Endpoints ==

#[tokio::test]
async fn test_clear_store_endpoint_is_isolated() {
    let (app, cache, _) = create_test_app();
    cache.put(StoreName::Posts, CacheRecord::new("p1", 1)).await;
    cache.put(StoreName::Groups, CacheRecord::new("g1", 2)).await;

    let (status, json) = send(&app, "DELETE", "/stores/posts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stores"], json!(["posts"]));

    assert_eq!(cache.get::<i32>(StoreName::Posts, "p1").await, None);
    assert_eq!(cache.get::<i32>(StoreName::Groups, "g1").await, Some(2));
}

#[tokio::test]
async fn test_clear_all_endpoint() {
    let (app, cache, _) = create_test_app();
    for store in StoreName::ALL {
        cache.put(store, CacheRecord::new("k", 1)).await;
    }

    let (status, json) = send(&app, "DELETE", "/stores").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stores"].as_array().unwrap().len(), StoreName::ALL.len());

    let (_, stats) = send(&app, "GET", "/stats").await;
    assert_eq!(stats["total"]["total_entries"], 0);
}

#[tokio::test]
async fn test_sweep_endpoint_removes_expired() {
    let (app, cache, clock) = create_test_app();
    cache
        .put(StoreName::Notifications, CacheRecord::new("n1", 1))
        .await;
    cache
        .put(StoreName::Profiles, CacheRecord::new("u1", 1))
        .await;
    clock.advance(Duration::minutes(2));

    let (status, json) = send(&app, "POST", "/sweep").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], 1);
}

#[tokio::test]
async fn test_stats_endpoint() {
    let (app, cache, _) = create_test_app();
    cache.put(StoreName::Posts, CacheRecord::new("p1", 1)).await;
    let _ = cache.get::<i32>(StoreName::Posts, "p1").await;
    let _ = cache.get::<i32>(StoreName::Posts, "p2").await;

    let (status, json) = send(&app, "GET", "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["backend"], "memory");
    let posts = json["stores"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["store"] == "posts")
        .unwrap();
    assert_eq!(posts["hits"], 1);
    assert_eq!(posts["misses"], 1);
    assert_eq!(posts["total_entries"], 1);
    assert_eq!(posts["window_seconds"], 300);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _, _) = create_test_app();

    let (status, json) = send(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_unknown_store_rejected() {
    let (app, _, _) = create_test_app();

    let (status, json) = send(&app, "GET", "/stores/videos/v1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("videos"));
}

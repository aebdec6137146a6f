//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use lru_kv::{api::create_router, cache::CacheStore, AppState};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(capacity_bytes: usize) -> Router {
    let cache = CacheStore::new(capacity_bytes);
    let state = AppState::new(cache);
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn write_request(uri: &str, key: &str, value: &str) -> Request<Body> {
    let body = serde_json::json!({ "key": key, "value": value }).to_string();
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get_request(key: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/get/{}", key))
        .body(Body::empty())
        .unwrap()
}

fn delete_request(key: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(format!("/del/{}", key))
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == PUT Endpoint Tests ==

#[tokio::test]
async fn test_put_endpoint_success() {
    let app = create_test_app(100);

    let (status, json) = send(&app, write_request("/put", "test_key", "test_value")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"].as_str().unwrap(), "test_key");
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_put_endpoint_overwrite() {
    let app = create_test_app(100);

    send(&app, write_request("/put", "k", "v")).await;
    let (status, _) = send(&app, write_request("/put", "k", "v2")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, get_request("k")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"].as_str().unwrap(), "v2");
}

#[tokio::test]
async fn test_put_endpoint_capacity_exceeded() {
    let app = create_test_app(10);

    let (status, json) = send(&app, write_request("/put", "k", "0123456789")).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(json.get("error").is_some());

    let (status, _) = send(&app, get_request("k")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == PUTNX Endpoint Tests ==

#[tokio::test]
async fn test_putnx_endpoint_keeps_first_value() {
    let app = create_test_app(10);

    let (status, _) = send(&app, write_request("/putnx", "x", "1")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, write_request("/putnx", "x", "2")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("x"));

    let (_, json) = send(&app, get_request("x")).await;
    assert_eq!(json["value"].as_str().unwrap(), "1");
}

// == SET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_never_creates() {
    let app = create_test_app(10);

    let (status, _) = send(&app, write_request("/set", "y", "1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get_request("y")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_set_endpoint_rejected_update_keeps_value() {
    let app = create_test_app(10);

    send(&app, write_request("/put", "y", "old")).await;
    let (status, _) = send(&app, write_request("/set", "y", "0123456789")).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    let (_, json) = send(&app, get_request("y")).await;
    assert_eq!(json["value"].as_str().unwrap(), "old");
}

// == Eviction Through The API ==

#[tokio::test]
async fn test_byte_budget_eviction_via_api() {
    let app = create_test_app(10);

    send(&app, write_request("/put", "a", "12345")).await;
    send(&app, write_request("/put", "b", "1234")).await;
    send(&app, write_request("/put", "c", "1")).await;

    let (status, _) = send(&app, get_request("a")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, stats) = send(
        &app,
        Request::builder().uri("/stats").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(stats["used_bytes"].as_u64().unwrap(), 7);
    assert_eq!(stats["total_entries"].as_u64().unwrap(), 2);
    assert_eq!(stats["evictions"].as_u64().unwrap(), 1);
}

#[tokio::test]
async fn test_update_protects_key_from_eviction() {
    let app = create_test_app(6);

    send(&app, write_request("/put", "a", "1")).await;
    send(&app, write_request("/put", "b", "1")).await;
    send(&app, write_request("/put", "c", "1")).await;
    send(&app, write_request("/put", "a", "2")).await;
    send(&app, write_request("/put", "d", "1")).await;

    let (status, _) = send(&app, get_request("b")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(&app, get_request("a")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"].as_str().unwrap(), "2");
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app(100);

    send(&app, write_request("/put", "get_key", "get_value")).await;
    let (status, json) = send(&app, get_request("get_key")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"].as_str().unwrap(), "get_key");
    assert_eq!(json["value"].as_str().unwrap(), "get_value");
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app(100);

    let (status, json) = send(&app, get_request("nonexistent_key")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint_success() {
    let app = create_test_app(100);

    send(&app, write_request("/put", "delete_key", "delete_value")).await;

    let (status, _) = send(&app, delete_request("delete_key")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get_request("delete_key")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_endpoint_twice() {
    let app = create_test_app(100);

    send(&app, write_request("/put", "k", "v")).await;

    let (first, _) = send(&app, delete_request("k")).await;
    let (second, _) = send(&app, delete_request("k")).await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::NOT_FOUND);
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app(100);

    send(&app, write_request("/put", "stats_key", "stats_value")).await;
    send(&app, write_request("/set", "missing", "x")).await;
    send(&app, get_request("stats_key")).await;

    let (status, json) = send(
        &app,
        Request::builder()
            .method("GET")
            .uri("/stats")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["inserts"].as_u64().unwrap(), 1);
    assert_eq!(json["rejections"].as_u64().unwrap(), 1);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert_eq!(json["used_bytes"].as_u64().unwrap(), 20);
    assert_eq!(json["capacity_bytes"].as_u64().unwrap(), 100);
    assert!(json.get("utilization").is_some());
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(100);

    let (status, json) = send(
        &app,
        Request::builder()
            .method("GET")
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app(100);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/put")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"invalid json"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Axum returns 400/422 for JSON parsing errors by default
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_empty_key_request() {
    let app = create_test_app(100);

    let (status, json) = send(&app, write_request("/put", "", "test")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

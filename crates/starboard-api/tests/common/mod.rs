//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use starboard_core::clock::Clock;
use starboard_core::repository::RatingRepository;
use starboard_store::StoreConfig;
use starboard_test_support::SteppingClock;
use tower::ServiceExt;

use starboard_api::build_router;
use starboard_api::state::AppState;

/// Clock starting at a fixed instant and advancing one second per rating,
/// so recency ordering is deterministic.
fn stepping_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(SteppingClock::new(
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        Duration::seconds(1),
    ))
}

/// Opens a fresh in-memory SQLite rating store through the production
/// `connect` path.
pub async fn sqlite_repository() -> Arc<dyn RatingRepository> {
    starboard_store::connect(&StoreConfig {
        database_url: "sqlite::memory:".to_owned(),
        max_connections: 1,
    })
    .await
    .unwrap()
}

/// Build the full app router over `rating_repository`.
pub fn build_test_app(rating_repository: Arc<dyn RatingRepository>) -> Router {
    build_router(AppState::new(stepping_clock(), rating_repository))
}

/// Build the full app router over a fresh in-memory SQLite store.
pub async fn build_sqlite_app() -> Router {
    build_test_app(sqlite_repository().await)
}

/// Response status, headers and JSON body (`Null` for empty bodies).
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: serde_json::Value,
}

async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    TestResponse {
        status,
        headers,
        json,
    }
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = send(app, request).await;
    (response.status, response.json)
}

/// Send a POST request with a raw body and an optional content type.
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> TestResponse {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body)).unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = get(app, uri).await;
    (response.status, response.json)
}

/// Send a GET request and return status, headers and body.
pub async fn get(app: Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a bare OPTIONS request.
pub async fn options(app: Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method("OPTIONS")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Submit one rating through the write endpoint and return its id.
pub async fn submit(app: &Router, service_provider_id: &str, rating: i64) -> i64 {
    let (status, json) = post_json(
        app.clone(),
        "/api/ratings",
        &serde_json::json!({ "serviceProviderId": service_provider_id, "rating": rating }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {json}");
    json["id"].as_i64().unwrap()
}

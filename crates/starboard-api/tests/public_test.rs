//! Integration tests for the public, CORS-enabled rating API over SQLite.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use starboard_test_support::{FailingRatingRepository, InMemoryRatingRepository};

fn assert_cors(response: &common::TestResponse) {
    assert_eq!(response.headers["access-control-allow-origin"], "*");
    assert_eq!(response.headers["access-control-allow-headers"], "Content-Type");
    assert!(
        response.headers["access-control-allow-methods"]
            .to_str()
            .unwrap()
            .contains("GET")
    );
}

// --- /api/public/rating ---

#[tokio::test]
async fn test_public_rating_summary_with_star_breakdown() {
    let app = common::build_sqlite_app().await;
    for rating in [4, 4, 3] {
        common::submit(&app, "acme", rating).await;
    }

    let response = common::get(app, "/api/public/rating?serviceProviderId=acme").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_cors(&response);
    let json = &response.json;
    assert_eq!(json["serviceProviderId"], "acme");
    assert_eq!(json["averageRating"], 3.7);
    assert_eq!(json["totalRatings"], 3);
    assert_eq!(json["stars"]["full"], 3);
    assert_eq!(json["stars"]["partial"], 0.7);
    assert_eq!(json["stars"]["empty"], 1);
    assert!(json.get("recentRatings").is_none());
}

#[tokio::test]
async fn test_public_rating_for_unrated_provider_is_zeroed() {
    let app = common::build_sqlite_app().await;

    let response = common::get(
        app,
        "/api/public/rating?serviceProviderId=nobody&includeRecentRatings=true",
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json["averageRating"], 0.0);
    assert_eq!(response.json["totalRatings"], 0);
    assert_eq!(response.json["stars"]["empty"], 5);
    assert!(response.json.get("recentRatings").is_none());
}

#[tokio::test]
async fn test_public_rating_includes_recent_ratings_newest_first() {
    let app = common::build_sqlite_app().await;
    for rating in [1, 2, 3, 4, 5] {
        common::submit(&app, "acme", rating).await;
    }

    let response = common::get(
        app,
        "/api/public/rating?serviceProviderId=acme&includeRecentRatings=true&limit=3",
    )
    .await;

    let recent = response.json["recentRatings"].as_array().unwrap();
    let values: Vec<i64> = recent.iter().map(|r| r["rating"].as_i64().unwrap()).collect();
    assert_eq!(values, vec![5, 4, 3]);
    for entry in recent {
        assert!(entry["createdAt"].is_string());
        assert!(entry.get("ipAddress").is_none());
        assert!(entry.get("userAgent").is_none());
        assert_eq!(entry.as_object().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn test_public_rating_ignores_include_flag_other_than_true() {
    let app = common::build_sqlite_app().await;
    common::submit(&app, "acme", 5).await;

    let response = common::get(
        app,
        "/api/public/rating?serviceProviderId=acme&includeRecentRatings=yes",
    )
    .await;

    assert!(response.json.get("recentRatings").is_none());
}

#[tokio::test]
async fn test_public_rating_missing_id_returns_400_with_usage() {
    let app = common::build_sqlite_app().await;

    let response = common::get(app, "/api/public/rating").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_cors(&response);
    assert_eq!(
        response.json["error"],
        "serviceProviderId parameter is required"
    );
    assert!(response.json["usage"].as_str().unwrap().starts_with("GET /api/public/rating?"));
}

#[tokio::test]
async fn test_public_rating_store_failure_returns_zeroed_defaults() {
    let app = common::build_test_app(Arc::new(FailingRatingRepository));

    let response = common::get(app, "/api/public/rating?serviceProviderId=acme").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    assert!(response.json["serviceProviderId"].is_null());
    assert_eq!(response.json["averageRating"], 0.0);
    assert_eq!(response.json["totalRatings"], 0);
}

#[tokio::test]
async fn test_public_rating_unparseable_query_keeps_cors_and_usage() {
    let app = common::build_sqlite_app().await;

    let response =
        common::get(app, "/api/public/rating?serviceProviderId=a&limit=1&limit=2").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_cors(&response);
    assert_eq!(response.headers["content-type"], "application/json");
    assert_eq!(response.json["code"], "validation_error");
    assert!(response.json["error"].as_str().unwrap().contains("limit"));
    assert!(response.json["usage"].as_str().unwrap().starts_with("GET /api/public/rating?"));
}

// --- /api/public/ratings ---

#[tokio::test]
async fn test_public_ratings_lists_newest_first_without_audit_fields() {
    let app = common::build_sqlite_app().await;
    let mut ids = Vec::new();
    for rating in [2, 3, 4] {
        ids.push(common::submit(&app, "acme", rating).await);
    }

    let response = common::get(app, "/api/public/ratings?serviceProviderId=acme&limit=2").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_cors(&response);
    let ratings = response.json["ratings"].as_array().unwrap();
    assert_eq!(ratings.len(), 2);
    assert_eq!(ratings[0]["id"], ids[2]);
    assert_eq!(ratings[0]["rating"], 4);
    assert_eq!(ratings[1]["id"], ids[1]);
    for entry in ratings {
        let keys: Vec<&String> = entry.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3, "unexpected fields: {keys:?}");
    }
}

#[tokio::test]
async fn test_public_ratings_pagination_echoes_parameters() {
    let app = common::build_sqlite_app().await;
    for rating in [1, 2, 3, 4, 5] {
        common::submit(&app, "acme", rating).await;
    }

    let (status, json) = common::get_json(
        app,
        "/api/public/ratings?serviceProviderId=acme&limit=2&offset=4",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pagination"]["limit"], 2);
    assert_eq!(json["pagination"]["offset"], 4);
    // Page size, not the provider's five ratings.
    assert_eq!(json["pagination"]["total"], 2);
}

#[tokio::test]
async fn test_public_ratings_defaults_to_fifty() {
    let app = common::build_sqlite_app().await;

    let (status, json) = common::get_json(app, "/api/public/ratings?serviceProviderId=acme").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pagination"]["limit"], 50);
    assert_eq!(json["pagination"]["offset"], 0);
    assert_eq!(json["ratings"], serde_json::json!([]));
}

#[tokio::test]
async fn test_public_ratings_rejects_limit_over_100_before_storage() {
    let repo = Arc::new(InMemoryRatingRepository::new());
    let app = common::build_test_app(repo.clone());

    let response = common::get(app, "/api/public/ratings?serviceProviderId=acme&limit=101").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_cors(&response);
    assert_eq!(
        response.json["error"],
        "Limit cannot exceed 100 ratings per request"
    );
    assert_eq!(repo.call_count(), 0);
}

#[tokio::test]
async fn test_public_ratings_missing_id_returns_400() {
    let app = common::build_sqlite_app().await;

    let (status, json) = common::get_json(app, "/api/public/ratings?limit=10").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["usage"].as_str().unwrap().starts_with("GET /api/public/ratings?"));
}

#[tokio::test]
async fn test_public_ratings_store_failure_returns_empty_list() {
    let app = common::build_test_app(Arc::new(FailingRatingRepository));

    let (status, json) = common::get_json(app, "/api/public/ratings?serviceProviderId=acme").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["ratings"], serde_json::json!([]));
    assert_eq!(json["error"], "Internal server error");
    assert_eq!(json["code"], "internal_error");
}

#[tokio::test]
async fn test_public_ratings_unparseable_query_keeps_cors_and_usage() {
    let app = common::build_sqlite_app().await;

    let response =
        common::get(app, "/api/public/ratings?serviceProviderId=a&offset=1&offset=2").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_cors(&response);
    assert_eq!(response.json["code"], "validation_error");
    assert!(response.json["usage"].as_str().unwrap().starts_with("GET /api/public/ratings?"));
}

// --- preflight ---

#[tokio::test]
async fn test_options_preflight_returns_200_with_cors_headers() {
    for uri in ["/api/public/rating", "/api/public/ratings"] {
        let app = common::build_sqlite_app().await;

        let response = common::options(app, uri).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_cors(&response);
        assert!(
            response.headers["access-control-allow-methods"]
                .to_str()
                .unwrap()
                .contains("OPTIONS")
        );
    }
}

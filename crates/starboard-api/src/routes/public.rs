//! Public, read-only rating API for third parties.
//!
//! Every response, errors included, carries permissive CORS headers. Failures
//! answer with zeroed defaults so embedding pages can degrade gracefully.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use starboard_core::error::DomainError;
use tracing::{instrument, warn};

use starboard_ratings::application::query_handlers::{
    self, ListedRatingView, PublicRatingQuery, RatingListQuery,
};

use crate::error::ErrorBody;
use crate::state::AppState;

const RATING_USAGE: &str =
    "GET /api/public/rating?serviceProviderId=your-id&includeRecentRatings=true&limit=10";

const RATINGS_USAGE: &str = "GET /api/public/ratings?serviceProviderId=your-id&limit=50&offset=0";

fn cors_headers() -> [(HeaderName, &'static str); 3] {
    [
        (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"),
        (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    ]
}

/// Query parameters for GET /rating.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicRatingParams {
    /// The service provider to summarise.
    pub service_provider_id: Option<String>,
    /// `true` to attach recent ratings.
    pub include_recent_ratings: Option<String>,
    /// Number of recent ratings, capped at 50.
    pub limit: Option<String>,
}

/// Query parameters for GET /ratings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingListParams {
    /// The service provider to list.
    pub service_provider_id: Option<String>,
    /// Page size, at most 100.
    pub limit: Option<String>,
    /// Echoed offset.
    pub offset: Option<String>,
}

/// 400 body with a usage hint.
#[derive(Debug, Serialize)]
struct UsageErrorBody {
    #[serde(flatten)]
    body: ErrorBody,
    usage: &'static str,
}

/// 500 body of the summary endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RatingFallbackBody {
    #[serde(flatten)]
    body: ErrorBody,
    service_provider_id: Option<String>,
    average_rating: f64,
    total_ratings: i64,
}

/// 500 body of the listing endpoint.
#[derive(Debug, Serialize)]
struct RatingsFallbackBody {
    #[serde(flatten)]
    body: ErrorBody,
    ratings: Vec<ListedRatingView>,
}

/// Lenient integer parsing; anything unparseable counts as absent.
fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse().ok())
}

/// Builds the error response for a public endpoint; `fallback` supplies the
/// body for storage failures.
fn public_error<F, B>(err: &DomainError, usage: &'static str, fallback: F) -> Response
where
    F: FnOnce(ErrorBody) -> B,
    B: Serialize,
{
    let (status, body) = ErrorBody::from_domain(err);
    if status == StatusCode::BAD_REQUEST {
        (status, cors_headers(), Json(UsageErrorBody { body, usage })).into_response()
    } else {
        (status, cors_headers(), Json(fallback(body))).into_response()
    }
}

/// Unwraps query parameters, answering an unparseable query string with the
/// endpoint's usage hint.
fn query_params<T>(
    params: Result<Query<T>, QueryRejection>,
    usage: &'static str,
) -> Result<T, Response> {
    params.map(|Query(params)| params).map_err(|rejection| {
        warn!(%rejection, "unparseable public query string");
        let err = DomainError::Validation(rejection.body_text());
        public_error(&err, usage, |body| body)
    })
}

/// GET /rating
#[instrument(skip(state))]
async fn public_rating(
    State(state): State<AppState>,
    params: Result<Query<PublicRatingParams>, QueryRejection>,
) -> Response {
    let params = match query_params(params, RATING_USAGE) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let query = PublicRatingQuery {
        service_provider_id: params.service_provider_id,
        include_recent_ratings: params.include_recent_ratings.as_deref() == Some("true"),
        limit: parse_int(params.limit.as_deref()),
    };

    match query_handlers::get_public_rating(&query, &*state.rating_repository).await {
        Ok(view) => (StatusCode::OK, cors_headers(), Json(view)).into_response(),
        Err(err) => public_error(&err, RATING_USAGE, |body| RatingFallbackBody {
            body,
            service_provider_id: None,
            average_rating: 0.0,
            total_ratings: 0,
        }),
    }
}

/// GET /ratings
#[instrument(skip(state))]
async fn public_ratings(
    State(state): State<AppState>,
    params: Result<Query<RatingListParams>, QueryRejection>,
) -> Response {
    let params = match query_params(params, RATINGS_USAGE) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let query = RatingListQuery {
        service_provider_id: params.service_provider_id,
        limit: parse_int(params.limit.as_deref()),
        offset: parse_int(params.offset.as_deref()),
    };

    match query_handlers::list_public_ratings(&query, &*state.rating_repository).await {
        Ok(view) => (StatusCode::OK, cors_headers(), Json(view)).into_response(),
        Err(err) => public_error(&err, RATINGS_USAGE, |body| RatingsFallbackBody {
            body,
            ratings: Vec::new(),
        }),
    }
}

/// OPTIONS preflight for both public endpoints.
async fn preflight() -> impl IntoResponse {
    (StatusCode::OK, cors_headers())
}

/// Returns the router for the public API.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rating", get(public_rating).options(preflight))
        .route("/ratings", get(public_ratings).options(preflight))
}

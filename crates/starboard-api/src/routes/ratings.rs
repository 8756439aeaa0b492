//! First-party rating routes used by the embeddable widgets.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use starboard_core::error::DomainError;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use starboard_ratings::application::query_handlers::{self, AverageView};
use starboard_ratings::application::command_handlers;
use starboard_ratings::domain::commands::{ClientMetadata, SubmitRating};
use starboard_ratings::domain::validation::{FIELDS_REQUIRED, subject_from_json};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /api/ratings.
///
/// Fields are kept raw so that validation can report presence and range
/// problems with their own messages.
#[derive(Debug)]
pub struct SubmitRatingRequest {
    /// The service provider being rated.
    pub service_provider_id: Option<String>,
    /// The star value.
    pub rating: Option<Value>,
}

impl SubmitRatingRequest {
    /// Reads `serviceProviderId` (or `subjectId`) and `rating` (or `value`)
    /// from any JSON body. Bodies that are not objects yield no fields.
    #[must_use]
    pub fn from_json(body: &Value) -> Self {
        Self {
            service_provider_id: subject_from_json(field(body, "serviceProviderId", "subjectId")),
            rating: field(body, "rating", "value").cloned(),
        }
    }
}

fn field<'a>(body: &'a Value, name: &str, alias: &str) -> Option<&'a Value> {
    body.get(name).or_else(|| body.get(alias))
}

/// Response body returned after a rating is recorded.
#[derive(Debug, Serialize)]
pub struct SubmitRatingResponse {
    /// Always `true`.
    pub success: bool,
    /// Identifier of the new rating.
    pub id: i64,
}

/// Query parameters for GET /api/ratings/average.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageParams {
    /// The service provider to average.
    #[serde(default, alias = "subjectId")]
    pub service_provider_id: Option<String>,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// POST /api/ratings
///
/// A body that is not JSON, or is sent without a JSON content type, is
/// reported as missing fields.
#[instrument(skip(state, headers, body))]
async fn submit_rating(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitRatingResponse>), ApiError> {
    let Json(body) = body.map_err(|rejection| {
        warn!(%rejection, "unreadable rating submission");
        ApiError(DomainError::Validation(FIELDS_REQUIRED.to_owned()))
    })?;
    let request = SubmitRatingRequest::from_json(&body);

    let command = SubmitRating {
        correlation_id: Uuid::new_v4(),
        service_provider_id: request.service_provider_id,
        rating: request.rating,
        client: ClientMetadata::from_headers(
            header_str(&headers, "x-forwarded-for"),
            header_str(&headers, "x-real-ip"),
            header_str(&headers, header::USER_AGENT.as_str()),
        ),
    };

    info!(
        correlation_id = %command.correlation_id,
        service_provider_id = ?command.service_provider_id,
        "handling submit_rating command"
    );

    let result = command_handlers::handle_submit_rating(
        &command,
        state.clock.as_ref(),
        &*state.rating_repository,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitRatingResponse {
            success: true,
            id: result.id,
        }),
    ))
}

/// GET /api/ratings/average
#[instrument(skip(state))]
async fn average_rating(
    State(state): State<AppState>,
    Query(params): Query<AverageParams>,
) -> Result<Json<AverageView>, ApiError> {
    let view = query_handlers::get_average_rating(
        params.service_provider_id.as_deref(),
        &*state.rating_repository,
    )
    .await?;

    Ok(Json(view))
}

/// Returns the router for the first-party rating endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ratings", post(submit_rating))
        .route("/api/ratings/average", get(average_rating))
}

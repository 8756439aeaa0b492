//! Starboard rating API — error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use starboard_core::error::DomainError;
use thiserror::Error;
use tracing::error;

/// Message returned in place of any storage failure detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The rating store could not be opened.
    #[error("storage error: {0}")]
    Storage(#[from] DomainError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
///
/// `error` holds the human-readable message that existing clients display.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
    /// Machine-readable error code.
    pub code: &'static str,
}

impl ErrorBody {
    /// Status code and body for a domain error.
    ///
    /// Storage failures are logged here and reported with a generic message.
    #[must_use]
    pub fn from_domain(err: &DomainError) -> (StatusCode, Self) {
        match err {
            DomainError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Self {
                    error: message.clone(),
                    code: "validation_error",
                },
            ),
            DomainError::StorageUnavailable(_) => {
                error!(error = %err, "rating store unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self {
                        error: INTERNAL_ERROR_MESSAGE.to_owned(),
                        code: "storage_unavailable",
                    },
                )
            }
            DomainError::Infrastructure(_) => {
                error!(error = %err, "rating store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self {
                        error: INTERNAL_ERROR_MESSAGE.to_owned(),
                        code: "internal_error",
                    },
                )
            }
        }
    }
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = ErrorBody::from_domain(&self.0);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: DomainError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(DomainError::Validation("bad input".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_storage_unavailable_maps_to_500() {
        assert_eq!(
            status_of(DomainError::StorageUnavailable("no DATABASE_URL".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Infrastructure("db down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_details_are_not_exposed() {
        let (_, body) = ErrorBody::from_domain(&DomainError::Infrastructure(
            "password authentication failed for user rater".into(),
        ));
        assert_eq!(body.error, INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let (_, body) = ErrorBody::from_domain(&DomainError::Validation(
            "Rating must be a number between 1 and 5".into(),
        ));
        assert_eq!(body.code, "validation_error");
        assert_eq!(body.error, "Rating must be a number between 1 and 5");
    }
}

//! Command handlers for the ratings context.
//!
//! This module contains the application-level handler for rating
//! submissions: validate the request, stamp it, append it to the store.

use starboard_core::clock::Clock;
use starboard_core::error::DomainError;
use starboard_core::rating::NewRating;
use starboard_core::repository::RatingRepository;
use tracing::info;

use crate::domain::commands::SubmitRating;
use crate::domain::validation::validate_submission;

/// Result of a successfully handled submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRatingResult {
    /// Store-assigned identifier of the new rating.
    pub id: i64,
    /// The service provider that was rated.
    pub service_provider_id: String,
}

/// Handles the `SubmitRating` command: validates the raw fields, then appends
/// exactly one rating stamped with `clock` and the client audit metadata.
///
/// Nothing is written when validation fails.
///
/// # Errors
///
/// Returns `DomainError::Validation` for missing or out-of-range input, or the
/// repository's error if the insert fails.
pub async fn handle_submit_rating(
    command: &SubmitRating,
    clock: &dyn Clock,
    repo: &dyn RatingRepository,
) -> Result<SubmitRatingResult, DomainError> {
    let (subject_id, value) = validate_submission(
        command.service_provider_id.as_deref(),
        command.rating.as_ref(),
    )?;

    let rating = NewRating {
        subject_id,
        value,
        client_address: Some(command.client.address.clone()),
        client_agent: Some(command.client.agent.clone()),
        created_at: clock.now(),
    };

    let id = repo.insert(&rating).await?;

    info!(
        correlation_id = %command.correlation_id,
        rating_id = id,
        stars = value.get(),
        "rating recorded"
    );

    Ok(SubmitRatingResult {
        id,
        service_provider_id: rating.subject_id,
    })
}

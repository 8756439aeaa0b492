//! Page-size rules for the recency reads.

use starboard_core::error::DomainError;

/// Recent ratings returned by the public summary when no limit is given.
pub const DEFAULT_SUMMARY_LIMIT: i64 = 10;

/// Cap on recent ratings attached to the public summary.
pub const MAX_SUMMARY_LIMIT: i64 = 50;

/// Ratings returned by the public listing when no limit is given.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Largest page the public listing accepts.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Message returned when a listing limit exceeds [`MAX_LIST_LIMIT`].
pub const LIST_LIMIT_EXCEEDED: &str = "Limit cannot exceed 100 ratings per request";

/// Limit for the summary's recent ratings: defaulted, then clamped to `0..=50`.
#[must_use]
pub fn summary_limit(requested: Option<i64>) -> u32 {
    to_u32(
        requested
            .unwrap_or(DEFAULT_SUMMARY_LIMIT)
            .clamp(0, MAX_SUMMARY_LIMIT),
    )
}

/// Limit for the public listing: defaulted, negatives clamped to zero.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the limit exceeds [`MAX_LIST_LIMIT`].
pub fn list_limit(requested: Option<i64>) -> Result<u32, DomainError> {
    let limit = requested.unwrap_or(DEFAULT_LIST_LIMIT);
    if limit > MAX_LIST_LIMIT {
        return Err(DomainError::Validation(LIST_LIMIT_EXCEEDED.to_owned()));
    }
    Ok(to_u32(limit.max(0)))
}

fn to_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

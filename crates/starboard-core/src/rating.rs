//! Rating primitives shared by the store, the ratings context and the API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::DomainError;

/// Lowest accepted star value.
pub const MIN_RATING: i64 = 1;

/// Highest accepted star value.
pub const MAX_RATING: i64 = 5;

/// A star value guaranteed to lie in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RatingValue(u8);

impl RatingValue {
    /// Creates a rating value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `value` is outside `1..=5`.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        match u8::try_from(value) {
            Ok(stars) if (MIN_RATING..=MAX_RATING).contains(&value) => Ok(Self(stars)),
            _ => Err(DomainError::Validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {value}"
            ))),
        }
    }

    /// Returns the star value.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

/// A rating event that has been validated but not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    /// Opaque identifier of the service provider being rated.
    pub subject_id: String,
    /// The submitted star value.
    pub value: RatingValue,
    /// Client network address, kept for audit only.
    pub client_address: Option<String>,
    /// Client user-agent, kept for audit only.
    pub client_agent: Option<String>,
    /// Time the rating was submitted.
    pub created_at: DateTime<Utc>,
}

/// A persisted rating as exposed by read paths.
///
/// Carries no client address or user-agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingEntry {
    /// Store-assigned identifier.
    pub id: i64,
    /// The star value.
    pub value: RatingValue,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
}

/// Count and rounded mean of all ratings for one subject.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingAverage {
    /// Arithmetic mean rounded to one decimal place; `0.0` when `count == 0`.
    pub mean: f64,
    /// Number of ratings recorded for the subject.
    pub count: i64,
}

impl RatingAverage {
    /// Average of a subject with no ratings.
    pub const EMPTY: Self = Self {
        mean: 0.0,
        count: 0,
    };

    /// Builds an average from the raw `AVG`/`COUNT` pair returned by a store.
    ///
    /// A missing or non-finite mean, or a zero count, yields `EMPTY`.
    #[must_use]
    pub fn from_raw(mean: Option<f64>, count: i64) -> Self {
        match mean {
            Some(mean) if count > 0 && mean.is_finite() => Self {
                mean: round_to_tenth(mean),
                count,
            },
            _ => Self::EMPTY,
        }
    }
}

/// Rounds half away from zero to one decimal place.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

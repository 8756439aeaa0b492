//! Rating repository abstraction.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::rating::{NewRating, RatingAverage, RatingEntry};

/// Append-only store of rating events.
///
/// Implementations never update or delete a stored rating.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Appends one rating and returns its store-assigned identifier.
    async fn insert(&self, rating: &NewRating) -> Result<i64, DomainError>;

    /// Count and rounded mean over every rating for `subject_id`.
    ///
    /// A subject with no ratings yields `RatingAverage::EMPTY`, never an error.
    async fn average(&self, subject_id: &str) -> Result<RatingAverage, DomainError>;

    /// At most `limit` ratings for `subject_id`, newest first.
    ///
    /// `limit` is trusted; callers clamp it.
    async fn recent(&self, subject_id: &str, limit: u32) -> Result<Vec<RatingEntry>, DomainError>;
}

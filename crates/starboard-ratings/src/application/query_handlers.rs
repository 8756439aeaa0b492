//! Query handlers for the ratings context.
//!
//! This module contains the read paths behind the internal average endpoint,
//! the public summary and the public listing. None of the views carry client
//! address or user-agent.

use chrono::{DateTime, Utc};
use serde::Serialize;
use starboard_core::error::DomainError;
use starboard_core::rating::RatingEntry;
use starboard_core::repository::RatingRepository;

use crate::domain::limits::{list_limit, summary_limit};
use crate::domain::stars::StarBreakdown;
use crate::domain::validation::{PUBLIC_SUBJECT_REQUIRED, SUBJECT_REQUIRED, require_subject_id};

/// Count and rounded mean for one service provider.
#[derive(Debug, Clone, Serialize)]
pub struct AverageView {
    /// Mean rating rounded to one decimal, `0` without ratings.
    pub average: f64,
    /// Number of ratings.
    pub count: i64,
}

/// One recent rating in the public summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentRatingView {
    /// Star value.
    pub rating: u8,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl From<&RatingEntry> for RecentRatingView {
    fn from(entry: &RatingEntry) -> Self {
        Self {
            rating: entry.value.get(),
            created_at: entry.created_at,
        }
    }
}

/// Public summary of a service provider's ratings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicRatingView {
    /// The requested service provider.
    pub service_provider_id: String,
    /// Mean rating rounded to one decimal.
    pub average_rating: f64,
    /// Number of ratings.
    pub total_ratings: i64,
    /// Five-star breakdown of `average_rating`.
    pub stars: StarBreakdown,
    /// Newest ratings, present only when requested and at least one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_ratings: Option<Vec<RecentRatingView>>,
}

/// One entry of the public listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedRatingView {
    /// Store-assigned identifier.
    pub id: i64,
    /// Star value.
    pub rating: u8,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl From<&RatingEntry> for ListedRatingView {
    fn from(entry: &RatingEntry) -> Self {
        Self {
            id: entry.id,
            rating: entry.value.get(),
            created_at: entry.created_at,
        }
    }
}

/// Echo of the listing's paging parameters.
#[derive(Debug, Clone, Serialize)]
pub struct PaginationView {
    /// Effective page size.
    pub limit: u32,
    /// Offset as requested; not applied to the query.
    pub offset: i64,
    /// Number of ratings in this response, not the provider's total.
    pub total: usize,
}

/// Public listing of a service provider's newest ratings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingListView {
    /// The requested service provider.
    pub service_provider_id: String,
    /// Newest ratings first.
    pub ratings: Vec<ListedRatingView>,
    /// Paging echo.
    pub pagination: PaginationView,
}

/// Parameters of the public summary.
#[derive(Debug, Clone, Default)]
pub struct PublicRatingQuery {
    /// The service provider to summarise.
    pub service_provider_id: Option<String>,
    /// Whether to attach recent ratings.
    pub include_recent_ratings: bool,
    /// Requested number of recent ratings.
    pub limit: Option<i64>,
}

/// Parameters of the public listing.
#[derive(Debug, Clone, Default)]
pub struct RatingListQuery {
    /// The service provider to list.
    pub service_provider_id: Option<String>,
    /// Requested page size.
    pub limit: Option<i64>,
    /// Requested offset.
    pub offset: Option<i64>,
}

/// Retrieves the average rating for a service provider.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the id is missing, or the repository's
/// error.
pub async fn get_average_rating(
    service_provider_id: Option<&str>,
    repo: &dyn RatingRepository,
) -> Result<AverageView, DomainError> {
    let subject_id = require_subject_id(service_provider_id, SUBJECT_REQUIRED)?;
    let average = repo.average(subject_id).await?;
    Ok(AverageView {
        average: average.mean,
        count: average.count,
    })
}

/// Builds the public summary: average, count, star breakdown and, when asked
/// for and available, up to 50 recent ratings.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the id is missing, or the repository's
/// error.
pub async fn get_public_rating(
    query: &PublicRatingQuery,
    repo: &dyn RatingRepository,
) -> Result<PublicRatingView, DomainError> {
    let subject_id = require_subject_id(
        query.service_provider_id.as_deref(),
        PUBLIC_SUBJECT_REQUIRED,
    )?;
    let average = repo.average(subject_id).await?;

    let recent_ratings = if query.include_recent_ratings && average.count > 0 {
        let entries = repo.recent(subject_id, summary_limit(query.limit)).await?;
        Some(entries.iter().map(RecentRatingView::from).collect())
    } else {
        None
    };

    Ok(PublicRatingView {
        service_provider_id: subject_id.to_owned(),
        average_rating: average.mean,
        total_ratings: average.count,
        stars: StarBreakdown::from_mean(average.mean),
        recent_ratings,
    })
}

/// Lists the newest ratings of a service provider.
///
/// The limit is checked before the store is queried.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the id is missing or the limit exceeds
/// 100, or the repository's error.
pub async fn list_public_ratings(
    query: &RatingListQuery,
    repo: &dyn RatingRepository,
) -> Result<RatingListView, DomainError> {
    let subject_id = require_subject_id(
        query.service_provider_id.as_deref(),
        PUBLIC_SUBJECT_REQUIRED,
    )?;
    let limit = list_limit(query.limit)?;
    let offset = query.offset.unwrap_or(0).max(0);

    let entries = repo.recent(subject_id, limit).await?;
    let ratings: Vec<ListedRatingView> = entries.iter().map(ListedRatingView::from).collect();
    let total = ratings.len();

    Ok(RatingListView {
        service_provider_id: subject_id.to_owned(),
        ratings,
        pagination: PaginationView {
            limit,
            offset,
            total,
        },
    })
}

//! Row shapes shared by both backends.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use starboard_core::error::DomainError;
use starboard_core::rating::{RatingAverage, RatingEntry, RatingValue};

/// Result row of the aggregation query.
#[derive(Debug, FromRow)]
pub(crate) struct AverageRow {
    pub average: Option<f64>,
    pub count: i64,
}

impl From<AverageRow> for RatingAverage {
    fn from(row: AverageRow) -> Self {
        RatingAverage::from_raw(row.average, row.count)
    }
}

/// Result row of the recency query. Audit columns are never selected.
#[derive(Debug, FromRow)]
pub(crate) struct RatingRow {
    pub id: i64,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RatingRow> for RatingEntry {
    type Error = DomainError;

    fn try_from(row: RatingRow) -> Result<Self, Self::Error> {
        let value = RatingValue::new(i64::from(row.rating)).map_err(|_| {
            DomainError::Infrastructure(format!(
                "stored rating {} has out-of-range value {}",
                row.id, row.rating
            ))
        })?;
        Ok(RatingEntry {
            id: row.id,
            value,
            created_at: row.created_at,
        })
    }
}

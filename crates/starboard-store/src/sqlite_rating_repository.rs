//! SQLite implementation of the `RatingRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use starboard_core::error::DomainError;
use starboard_core::rating::{NewRating, RatingAverage, RatingEntry};
use starboard_core::repository::RatingRepository;

use crate::error::map_sqlx_error;
use crate::rows::{AverageRow, RatingRow};
use crate::schema::SQLITE_SCHEMA;

/// Embedded, file-backed rating repository.
#[derive(Debug, Clone)]
pub struct SqliteRatingRepository {
    pool: SqlitePool,
}

impl SqliteRatingRepository {
    /// Creates a new `SqliteRatingRepository`. The schema is not touched.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the ratings table and indexes if they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if the DDL cannot be executed.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::raw_sql(SQLITE_SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl RatingRepository for SqliteRatingRepository {
    async fn insert(&self, rating: &NewRating) -> Result<i64, DomainError> {
        let result = sqlx::query(
            "INSERT INTO ratings (service_provider_id, rating, created_at, ip_address, user_agent) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&rating.subject_id)
        .bind(i32::from(rating.value.get()))
        .bind(rating.created_at)
        .bind(rating.client_address.as_deref())
        .bind(rating.client_agent.as_deref())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn average(&self, subject_id: &str) -> Result<RatingAverage, DomainError> {
        let row: AverageRow = sqlx::query_as(
            "SELECT AVG(rating) AS average, COUNT(*) AS count \
             FROM ratings WHERE service_provider_id = ?",
        )
        .bind(subject_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn recent(&self, subject_id: &str, limit: u32) -> Result<Vec<RatingEntry>, DomainError> {
        let rows: Vec<RatingRow> = sqlx::query_as(
            "SELECT id, rating, created_at FROM ratings \
             WHERE service_provider_id = ? \
             ORDER BY created_at DESC, id DESC \
             LIMIT ?",
        )
        .bind(subject_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(RatingEntry::try_from).collect()
    }
}

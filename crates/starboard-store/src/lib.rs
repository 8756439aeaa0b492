//! Starboard Store — durable rating storage.
//!
//! Two interchangeable `RatingRepository` backends are provided: an embedded
//! SQLite file and a networked `PostgreSQL` database. [`connect`] picks one from
//! the connection URL, builds the pool and creates the schema exactly once,
//! returning a handle that the API injects into its request handlers.

use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use starboard_core::error::DomainError;
use starboard_core::repository::RatingRepository;

mod error;
mod rows;

pub mod pg_rating_repository;
pub mod schema;
pub mod sqlite_rating_repository;

pub use pg_rating_repository::PgRatingRepository;
pub use sqlite_rating_repository::SqliteRatingRepository;

/// Storage engine selected by the connection URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Embedded, file-based engine (`sqlite:` URLs).
    Sqlite,
    /// Networked relational engine (`postgres:` / `postgresql:` URLs).
    Postgres,
}

impl StorageBackend {
    /// Determines the backend from a database URL.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StorageUnavailable` for empty URLs and unknown
    /// schemes.
    pub fn from_url(database_url: &str) -> Result<Self, DomainError> {
        let url = database_url.trim();
        if url.is_empty() {
            return Err(DomainError::StorageUnavailable(
                "database URL is empty".to_owned(),
            ));
        }
        if url.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Self::Postgres)
        } else {
            Err(DomainError::StorageUnavailable(format!(
                "unsupported database URL scheme: {}",
                url.split(':').next().unwrap_or_default()
            )))
        }
    }
}

/// Connection settings for the rating store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// `sqlite:` or `postgres:` connection URL.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

/// Pool settings for the `SQLite` backend.
///
/// Every connection to `sqlite::memory:` opens a separate database, so memory
/// URLs get a single connection that is never retired.
fn sqlite_pool_options(config: &StoreConfig) -> SqlitePoolOptions {
    if config.database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    }
}

/// Opens the configured backend, creates its schema, and returns the shared
/// repository handle.
///
/// # Errors
///
/// Returns `DomainError::StorageUnavailable` when the URL is unusable or the
/// database cannot be reached, or any error raised while creating the schema.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn RatingRepository>, DomainError> {
    let backend = StorageBackend::from_url(&config.database_url)?;

    let repository: Arc<dyn RatingRepository> = match backend {
        StorageBackend::Sqlite => {
            let options = SqliteConnectOptions::from_str(&config.database_url)
                .map_err(|e| DomainError::StorageUnavailable(e.to_string()))?
                .create_if_missing(true);
            let pool = sqlite_pool_options(config)
                .connect_with(options)
                .await
                .map_err(|e| DomainError::StorageUnavailable(e.to_string()))?;
            let repository = SqliteRatingRepository::new(pool);
            repository.ensure_schema().await?;
            Arc::new(repository)
        }
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await
                .map_err(|e| DomainError::StorageUnavailable(e.to_string()))?;
            let repository = PgRatingRepository::new(pool);
            repository.ensure_schema().await?;
            Arc::new(repository)
        }
    };

    info!(?backend, "rating store ready");
    Ok(repository)
}

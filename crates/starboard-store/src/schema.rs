//! Rating store database schema.
//!
//! Both scripts are idempotent and keep the column names of the original
//! `ratings.db` layout so existing files can be opened unchanged.

/// SQL to create the ratings table and its indexes on SQLite.
pub const SQLITE_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS ratings (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    service_provider_id TEXT NOT NULL,
    rating              INTEGER NOT NULL CHECK (rating >= 1 AND rating <= 5),
    created_at          DATETIME DEFAULT CURRENT_TIMESTAMP,
    ip_address          TEXT,
    user_agent          TEXT
);

CREATE INDEX IF NOT EXISTS idx_service_provider_id ON ratings (service_provider_id);

CREATE INDEX IF NOT EXISTS idx_created_at ON ratings (created_at);
";

/// SQL to create the ratings table and its indexes on `PostgreSQL`.
pub const POSTGRES_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS ratings (
    id                  BIGSERIAL PRIMARY KEY,
    service_provider_id TEXT NOT NULL,
    rating              INTEGER NOT NULL CHECK (rating >= 1 AND rating <= 5),
    created_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    ip_address          TEXT,
    user_agent          TEXT
);

CREATE INDEX IF NOT EXISTS idx_service_provider_id ON ratings (service_provider_id);

CREATE INDEX IF NOT EXISTS idx_created_at ON ratings (created_at);
";

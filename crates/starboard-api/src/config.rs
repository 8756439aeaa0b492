//! Runtime configuration read from the environment.

use std::net::SocketAddr;
use std::str::FromStr;

use starboard_core::error::DomainError;
use starboard_store::StoreConfig;

use crate::error::AppError;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(AppError::Config(format!(
                "LOG_FORMAT must be `json` or `pretty`, got `{other}`"
            ))),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// `sqlite:` or `postgres:` connection URL.
    pub database_url: String,
    /// Pool size.
    pub max_connections: u32,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Config {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// See [`Config::from_lookup`].
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if `DATABASE_URL` is missing, and
    /// `AppError::Config` if any other value fails to parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                DomainError::StorageUnavailable(
                    "DATABASE_URL environment variable must be set".to_owned(),
                )
            })?;
        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .map_or(Ok(10), |raw| raw.trim().parse::<u32>())
            .map_err(|e| AppError::Config(format!("DATABASE_MAX_CONNECTIONS must be a valid u32: {e}")))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT")
            .map_or(Ok(3000), |raw| raw.trim().parse::<u16>())
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let log_format = lookup("LOG_FORMAT").map_or(Ok(LogFormat::Json), |raw| raw.parse())?;

        Ok(Self {
            database_url,
            max_connections,
            host,
            port,
            log_format,
        })
    }

    /// Socket address the server binds to.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a valid socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }

    /// Connection settings for the rating store.
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            database_url: self.database_url.clone(),
            max_connections: self.max_connections,
        }
    }
}

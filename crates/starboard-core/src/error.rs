//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Missing or out-of-range input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The rating store could not be reached or was never configured.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Any other failure raised by the storage layer.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

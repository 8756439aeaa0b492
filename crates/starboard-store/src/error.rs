//! Translation of `sqlx` failures into domain errors.

use starboard_core::error::DomainError;

/// Maps a `sqlx::Error` onto the domain error kinds.
///
/// Connectivity problems become `StorageUnavailable`, CHECK constraint
/// violations become `Validation`, anything else is `Infrastructure`.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err)
            if matches!(db_err.kind(), sqlx::error::ErrorKind::CheckViolation) =>
        {
            DomainError::Validation(format!("rating rejected by store: {db_err}"))
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_) => DomainError::StorageUnavailable(err.to_string()),
        _ => DomainError::Infrastructure(err.to_string()),
    }
}

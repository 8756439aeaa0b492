//! Shared application state.

use std::sync::Arc;

use starboard_core::clock::Clock;
use starboard_core::repository::RatingRepository;

/// Application state shared across all request handlers.
///
/// Built once at startup; the repository handle wraps the single connection
/// pool used for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    /// Clock used to stamp new ratings.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Rating store.
    pub rating_repository: Arc<dyn RatingRepository>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        rating_repository: Arc<dyn RatingRepository>,
    ) -> Self {
        Self {
            clock,
            rating_repository,
        }
    }
}

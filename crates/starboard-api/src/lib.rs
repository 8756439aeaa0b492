//! Starboard rating API — library surface shared by the binary and tests.

use axum::Router;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use state::AppState;

/// Builds the full application router.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::embed::router())
        .merge(routes::ratings::router())
        .nest("/api/public", routes::public::router())
        .with_state(app_state)
}

//! Embeddable widget page.
//!
//! A single self-contained HTML document hosts the average display and the
//! star picker; both talk to the first-party rating routes over HTTP. The
//! page reads `serviceProviderId`, `type`, `size` and `showCount` from its own
//! query string, so the server only has to hand it out.

use axum::http::header::CACHE_CONTROL;
use axum::response::{Html, IntoResponse};
use axum::{Router, routing::get};

use crate::state::AppState;

const EMBED_PAGE: &str = include_str!("../../assets/embed.html");

/// GET /embed
async fn embed_page() -> impl IntoResponse {
    ([(CACHE_CONTROL, "no-cache")], Html(EMBED_PAGE))
}

/// Returns the router for the widget page.
pub fn router() -> Router<AppState> {
    Router::new().route("/embed", get(embed_page))
}

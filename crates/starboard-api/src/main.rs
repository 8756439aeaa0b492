//! Starboard rating API server entry point.

use std::error::Error;
use std::sync::Arc;

use starboard_api::build_router;
use starboard_api::config::{Config, LogFormat};
use starboard_api::error::AppError;
use starboard_api::state::AppState;
use starboard_core::clock::SystemClock;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    // Read configuration from environment.
    let config = Config::from_env()?;

    init_tracing(config.log_format);

    tracing::info!("Starting Starboard rating API server");

    // Open the rating store once; every request shares this handle.
    let rating_repository = starboard_store::connect(&config.store_config())
        .await
        .map_err(AppError::from)?;

    // Build application state.
    let app_state = AppState::new(Arc::new(SystemClock), rating_repository);

    // Build router.
    let app = build_router(app_state).layer(TraceLayer::new_for_http());

    // Start server.
    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(AppError::from)?;

    axum::serve(listener, app).await.map_err(AppError::from)?;

    Ok(())
}

// File: services/hotelhub_backend/src/main.rs
use hotelhub_common::{logging, Context, HotelhubError};
use hotelhub_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

mod app_state;

use app_state::AppState;

#[tokio::main]
async fn main() -> Result<(), HotelhubError> {
    let config = Arc::new(load_config().context("Failed to load config")?);

    // Flushes the file log on drop, so it lives as long as main
    let _log_guard = logging::init_from_config(&config.logging);

    let state = AppState::new(config.clone())
        .await
        .context("Failed to initialize stores")?;
    let app = state.router();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;

    Ok(())
}

use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use hound_preview::api;
use hound_preview::config::Config;
use hound_preview::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    if config.is_configured() {
        tracing::info!("Hound server: {}", config.hound_base_url);
    } else {
        tracing::warn!("HOUND_BASE_URL not set; searches will prompt for configuration");
    }
    tracing::info!("Debounce window: {}ms", config.debounce_ms);

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config);

    let app = Router::new()
        .route("/api/search", post(api::search::search))
        .route("/api/execute", post(api::search::execute))
        .route("/api/preview", post(api::preview::preview))
        .route("/api/events", get(api::events::events))
        .route("/api/config", get(api::config::get_config).put(api::config::update_config))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {bind_addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

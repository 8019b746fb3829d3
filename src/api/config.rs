use axum::extract::State;
use axum::Json;

use crate::config::{Config, ConfigUpdate};
use crate::state::AppState;

/// GET /api/config - Current preferences
pub async fn get_config(State(state): State<AppState>) -> Json<Config> {
    Json(state.config.borrow().clone())
}

/// PUT /api/config - Update preferences. The plugin rebuilds its client on change.
pub async fn update_config(
    State(state): State<AppState>,
    Json(update): Json<ConfigUpdate>,
) -> Json<Config> {
    state.config.send_modify(|config| update.apply(config));
    let config = state.config.borrow().clone();
    tracing::info!(
        "Config updated (Hound URL: {})",
        config.backend_url().unwrap_or("<unset>")
    );
    Json(config)
}

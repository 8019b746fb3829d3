use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use crate::models::ActionPayload;
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

impl PreviewRequest {
    /// Read a request body. Anything unreadable previews as nothing.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_else(|e| {
            tracing::debug!("Ignoring malformed preview request: {e}");
            Self::default()
        })
    }

    /// The item's action, or `None` when it is missing or malformed.
    pub fn action(&self) -> Option<ActionPayload> {
        let value = self.payload.clone()?;
        match serde_json::from_value(value) {
            Ok(action) => Some(action),
            Err(e) => {
                tracing::debug!(id = %self.id, "Ignoring malformed preview payload: {e}");
                None
            }
        }
    }
}

/// POST /api/preview - Render the merged match preview of an item.
/// Items without a readable file match get 204.
pub async fn preview(State(state): State<AppState>, body: Bytes) -> Response {
    let req = PreviewRequest::parse(&body);
    let action = req.action();

    let mut document = None;
    state
        .plugin
        .render_preview(&req.id, action.as_ref(), |html| document = Some(html));

    match document {
        Some(html) => Html(html).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

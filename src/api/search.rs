use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::ActionPayload;
use crate::search::Dispatch;
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchAccepted {
    pub status: &'static str,
    pub generation: Option<u64>,
}

impl From<Dispatch> for SearchAccepted {
    fn from(dispatch: Dispatch) -> Self {
        match dispatch {
            Dispatch::Ignored => Self {
                status: "ignored",
                generation: None,
            },
            Dispatch::Unconfigured => Self {
                status: "unconfigured",
                generation: None,
            },
            Dispatch::Scheduled(generation) => Self {
                status: "scheduled",
                generation: Some(generation),
            },
        }
    }
}

/// POST /api/search - Feed a keystroke into the debounced search.
/// Results arrive on `/api/events`.
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> (StatusCode, Json<SearchAccepted>) {
    let dispatch = state.plugin.search(&req.query, state.sink());
    (StatusCode::ACCEPTED, Json(dispatch.into()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteRequest {
    pub id: String,
    pub payload: Option<ActionPayload>,
}

/// POST /api/execute - Run the action of a selected item.
pub async fn execute(State(state): State<AppState>, Json(req): Json<ExecuteRequest>) -> StatusCode {
    state.plugin.execute(&req.id, req.payload.as_ref());
    StatusCode::NO_CONTENT
}

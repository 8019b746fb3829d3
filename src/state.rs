use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{broadcast, watch};

use crate::config::Config;
use crate::models::{StatusMessage, UiState};
use crate::plugin::{Host, HoundPlugin};
use crate::search::ResultSink;

/// Buffered events per SSE subscriber before it starts lagging.
const EVENT_BUFFER: usize = 64;

/// Everything pushed to browser clients over `/api/events`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    State {
        state: UiState,
        message: Option<StatusMessage>,
    },
    OpenUrl {
        url: String,
    },
    OpenPreferences {
        plugin_id: String,
    },
    Close,
}

impl UiEvent {
    /// SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::State { .. } => "state",
            Self::OpenUrl { .. } => "open_url",
            Self::OpenPreferences { .. } => "open_preferences",
            Self::Close => "close",
        }
    }
}

/// Fans plugin output out to every connected client. Acts as both the result
/// sink and the host of the plugin.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<UiEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_BUFFER);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }

    fn publish(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("No UI clients connected; event dropped");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSink for EventBus {
    fn push(&self, state: UiState) {
        let message = state.message();
        self.publish(UiEvent::State { state, message });
    }
}

impl Host for EventBus {
    fn open_external(&self, url: &str) {
        self.publish(UiEvent::OpenUrl {
            url: url.to_string(),
        });
    }

    fn open_preferences(&self, plugin_id: &str) {
        self.publish(UiEvent::OpenPreferences {
            plugin_id: plugin_id.to_string(),
        });
    }

    fn close(&self) {
        self.publish(UiEvent::Close);
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<watch::Sender<Config>>,
    pub plugin: Arc<HoundPlugin<EventBus>>,
    pub events: EventBus,
}

impl AppState {
    /// Build the state and start following configuration changes.
    /// Must be called inside a tokio runtime.
    pub fn new(config: Config) -> Self {
        let events = EventBus::new();
        let (config_tx, config_rx) = watch::channel(config.clone());

        let plugin = HoundPlugin::new(&config, events.clone());
        // Runs until `config_tx` is dropped together with the state.
        plugin.startup(config_rx);

        Self {
            config: Arc::new(config_tx),
            plugin: Arc::new(plugin),
            events,
        }
    }

    pub fn sink(&self) -> Arc<dyn ResultSink> {
        Arc::new(self.events.clone())
    }
}

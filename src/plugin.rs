//! The surface a launcher UI drives: startup, search, execute, preview.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::models::ActionPayload;
use crate::preview::render::render;
use crate::search::{Dispatch, ResultSink, SearchOrchestrator};

/// Identifier under which the host stores this plugin's preferences.
pub const PLUGIN_ID: &str = "hain-plugin-hound";

/// Side effects the plugin asks of the application hosting it.
pub trait Host: Send + Sync {
    fn open_external(&self, url: &str);
    fn open_preferences(&self, plugin_id: &str);
    /// Hide the launcher window.
    fn close(&self);
}

pub struct HoundPlugin<H> {
    orchestrator: SearchOrchestrator,
    host: H,
}

impl<H: Host> HoundPlugin<H> {
    pub fn new(config: &Config, host: H) -> Self {
        Self::with_orchestrator(SearchOrchestrator::new(config), host)
    }

    pub fn with_orchestrator(orchestrator: SearchOrchestrator, host: H) -> Self {
        Self { orchestrator, host }
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator {
        &self.orchestrator
    }

    /// Apply the current preferences and follow later changes until the
    /// sender is dropped.
    pub fn startup(&self, mut prefs: watch::Receiver<Config>) -> JoinHandle<()> {
        self.orchestrator.reconfigure(&prefs.borrow_and_update());

        let orchestrator = self.orchestrator.clone();
        tokio::spawn(async move {
            while prefs.changed().await.is_ok() {
                let config = prefs.borrow_and_update().clone();
                tracing::info!("Preferences changed, rebuilding Hound client");
                orchestrator.reconfigure(&config);
            }
        })
    }

    pub fn search(&self, query: &str, sink: Arc<dyn ResultSink>) -> Dispatch {
        self.orchestrator.search(query, sink)
    }

    /// Run the action attached to the selected item.
    pub fn execute(&self, id: &str, payload: Option<&ActionPayload>) {
        let Some(payload) = payload else {
            return;
        };

        match payload {
            ActionPayload::Prefs => self.host.open_preferences(PLUGIN_ID),
            ActionPayload::Open { target_url, .. } => {
                if target_url.is_empty() {
                    tracing::debug!("Item {id} has no URL to open");
                    return;
                }
                self.host.open_external(target_url);
                self.host.close();
            }
        }
    }

    /// Render the preview for an item and hand it to `render_to`. Items
    /// without a file match render nothing and `render_to` is not called.
    pub fn render_preview(
        &self,
        id: &str,
        payload: Option<&ActionPayload>,
        render_to: impl FnOnce(String),
    ) {
        match preview_document(payload) {
            Some(html) => render_to(html),
            None => tracing::debug!("No preview for item {id}"),
        }
    }
}

/// The preview document for `payload`, if it carries a file match.
pub fn preview_document(payload: Option<&ActionPayload>) -> Option<String> {
    match payload {
        Some(ActionPayload::Open { file_match, .. }) => Some(render(Some(file_match))),
        _ => None,
    }
}

//! Debounced two-stage search against the Hound backend.
//!
//! Every keystroke calls [`SearchOrchestrator::search`]. The UI is switched to
//! the loading state immediately, but the remote sequence (list repositories,
//! then search within them) only starts once no newer query has arrived for
//! the debounce window. A dispatched sequence is never cancelled; instead each
//! query carries a generation number and a response whose generation is no
//! longer current is dropped on arrival.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::Result;
use crate::hound::{HoundClient, SearchBackend};
use crate::models::{ResultEntry, UiState};
use crate::search::transform::{transform, TransformOptions};

/// Receives UI state updates. Called while the orchestrator holds its state
/// lock, so implementations must not call back into the orchestrator.
pub trait ResultSink: Send + Sync {
    fn push(&self, state: UiState);
}

impl<F> ResultSink for F
where
    F: Fn(UiState) + Send + Sync,
{
    fn push(&self, state: UiState) {
        self(state)
    }
}

/// Where the orchestrator currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Unconfigured,
    Loading,
    Succeeded,
    Failed,
}

/// What a call to [`SearchOrchestrator::search`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Blank query; nothing changed.
    Ignored,
    /// No backend is configured; the sink was told so.
    Unconfigured,
    /// A debounced search was armed with this generation.
    Scheduled(u64),
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub debounce: Duration,
    pub transform: TransformOptions,
}

impl SearchOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            debounce: config.debounce(),
            transform: TransformOptions {
                max_results: config.max_results,
                branch: config.default_branch.clone(),
            },
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Coordinates debounced searches. Clones share the same state.
#[derive(Clone)]
pub struct SearchOrchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    backend: RwLock<Option<Arc<dyn SearchBackend>>>,
    options: RwLock<SearchOptions>,
    pending: Mutex<Option<JoinHandle<()>>>,
    generation: AtomicU64,
    phase: Mutex<SearchPhase>,
}

impl SearchOrchestrator {
    /// Build an orchestrator bound to the backend described by `config`.
    pub fn new(config: &Config) -> Self {
        let orchestrator = Self::with_backend(None, SearchOptions::from_config(config));
        orchestrator.reconfigure(config);
        orchestrator
    }

    pub fn with_backend(backend: Option<Arc<dyn SearchBackend>>, options: SearchOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend: RwLock::new(backend),
                options: RwLock::new(options),
                pending: Mutex::new(None),
                generation: AtomicU64::new(0),
                phase: Mutex::new(SearchPhase::Idle),
            }),
        }
    }

    /// Rebuild the client and options after a configuration change.
    pub fn reconfigure(&self, config: &Config) {
        let backend: Option<Arc<dyn SearchBackend>> = match HoundClient::from_config(config) {
            Ok(client) => {
                tracing::info!("Hound client bound to {}", client.base_url());
                Some(Arc::new(client))
            }
            Err(e) if e.is_configuration_error() => {
                tracing::info!("Hound base URL not set; searches will prompt for configuration");
                None
            }
            Err(e) => {
                tracing::warn!("Failed to build Hound client: {e}");
                None
            }
        };

        self.set_backend(backend);
        *self.inner.options.write() = SearchOptions::from_config(config);
    }

    pub fn set_backend(&self, backend: Option<Arc<dyn SearchBackend>>) {
        *self.inner.backend.write() = backend;
    }

    pub fn is_configured(&self) -> bool {
        self.inner.backend.read().is_some()
    }

    pub fn phase(&self) -> SearchPhase {
        *self.inner.phase.lock()
    }

    /// Handle a query from the UI. Must be called inside a tokio runtime.
    pub fn search(&self, query: &str, sink: Arc<dyn ResultSink>) -> Dispatch {
        let query = query.trim();
        if query.is_empty() {
            return Dispatch::Ignored;
        }

        // Held across the generation bump and the timer swap so concurrent
        // callers arm timers in generation order.
        let mut pending = self.inner.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        if !self.is_configured() {
            let mut phase = self.inner.phase.lock();
            // Anything still in flight belongs to the old configuration.
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
            *phase = SearchPhase::Unconfigured;
            sink.push(UiState::Unconfigured);
            return Dispatch::Unconfigured;
        }

        let generation = {
            let mut phase = self.inner.phase.lock();
            let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *phase = SearchPhase::Loading;
            sink.push(UiState::Loading);
            generation
        };

        let debounce = self.inner.options.read().debounce;
        let inner = Arc::clone(&self.inner);
        let query = query.to_string();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            // Aborting the timer from here on must not cancel the request.
            tokio::spawn(async move { inner.run(generation, query, sink).await });
        }));
        drop(pending);
        tracing::debug!(generation, "search armed");

        Dispatch::Scheduled(generation)
    }
}

impl Inner {
    async fn run(&self, generation: u64, query: String, sink: Arc<dyn ResultSink>) {
        let Some(backend) = self.backend.read().clone() else {
            self.settle(generation, SearchPhase::Unconfigured, UiState::Unconfigured, &*sink);
            return;
        };
        let options = self.options.read().transform.clone();

        tracing::debug!(generation, "searching Hound for '{query}'");
        match fetch_entries(backend.as_ref(), &query, &options).await {
            Ok(entries) => {
                tracing::info!("'{query}': {} results", entries.len());
                self.settle(generation, SearchPhase::Succeeded, UiState::Results(entries), &*sink);
            }
            Err(e) => {
                let err = anyhow::Error::new(e);
                tracing::error!("Hound search for '{query}' failed: {err:#}");
                self.settle(generation, SearchPhase::Failed, UiState::Failed, &*sink);
            }
        }
    }

    /// Publish the outcome of `generation` unless a newer query has started since.
    fn settle(&self, generation: u64, next: SearchPhase, state: UiState, sink: &dyn ResultSink) {
        let mut phase = self.phase.lock();
        let current = self.generation.load(Ordering::SeqCst);
        if current != generation {
            tracing::debug!(generation, current, "dropping stale search response");
            return;
        }
        *phase = next;
        sink.push(state);
    }
}

/// The remote sequence: enumerate repositories, search them, shape the results.
pub async fn fetch_entries(
    backend: &dyn SearchBackend,
    query: &str,
    options: &TransformOptions,
) -> Result<Vec<ResultEntry>> {
    let repos = backend.list_repos().await?;
    let ids: Vec<String> = repos.keys().cloned().collect();

    let raw = backend.search(query, &ids, options.max_results).await?;
    let grouped = transform(&repos, raw, options)?;

    Ok(grouped.into_values().flatten().collect())
}

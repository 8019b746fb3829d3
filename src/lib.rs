//! # hound-preview
//!
//! Search-as-you-type against a [Hound](https://github.com/hound-search/hound)
//! code search server, with merged match previews.
//!
//! ## Architecture
//!
//! ```text
//!   keystroke ──► SearchOrchestrator ──(debounce 200ms)──► GET /api/v1/repos
//!                   │ Loading                                   │
//!                   │                                           ▼
//!                   │                         GET /api/v1/search?repos=a,b,..
//!                   │                                           │
//!                   │                                           ▼
//!                   │                               transform → ResultEntry list
//!                   ▼                                           │
//!              ResultSink ◄──── Results / Failed (stale generations dropped)
//!
//!   selection ──► merge (line groups) ──► render (HTML preview)
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration and the "unconfigured" placeholder
//! - [`error`] - Pipeline error type
//! - [`models`] - Hound wire types and UI types (`ResultEntry`, `LineGroup`, `UiState`)
//! - [`hound`] - `reqwest` adapter for the two Hound endpoints, behind `SearchBackend`
//! - [`search::transform`] - Raw results → UI entries with labels and browse URLs
//! - [`search::orchestrator`] - Debounced two-stage search with stale-response guard
//! - [`preview::merge`] - Overlapping match windows → consecutive line groups
//! - [`preview::render`] - Line groups → HTML document
//! - [`plugin`] - Launcher surface: startup, search, execute, render_preview
//! - [`api`] / [`state`] - Axum host exposing the plugin over HTTP + SSE

pub mod api;
pub mod config;
pub mod error;
pub mod hound;
pub mod models;
pub mod plugin;
pub mod preview;
pub mod search;
pub mod state;

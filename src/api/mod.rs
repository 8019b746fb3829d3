//! Axum handlers exposing the plugin surface to a browser UI.

pub mod config;
pub mod events;
pub mod preview;
pub mod search;

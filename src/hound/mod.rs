//! Client side of the Hound REST API.

pub mod client;

pub use client::{HoundClient, SearchBackend};

//! Match preview: line merging and HTML rendering.

pub mod merge;
pub mod render;

//! Query orchestration and result shaping.

pub mod orchestrator;
pub mod transform;

pub use orchestrator::{Dispatch, ResultSink, SearchOrchestrator, SearchPhase};

use crate::interview::engine::InterviewEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The interview state machine with its gateway, store, and fetcher seams.
    pub engine: InterviewEngine,
}

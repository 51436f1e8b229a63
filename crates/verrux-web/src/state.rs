//! Shared application state for the web server.

use std::sync::Arc;

use verrux_ranker::PredictionContext;

/// Shared state injected into every Axum handler.
///
/// The prediction context is immutable after startup, so handlers read it
/// concurrently without locking.
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<PredictionContext>,
}

impl AppState {
    pub fn new(context: PredictionContext) -> Self {
        Self { context: Arc::new(context) }
    }
}

pub type SharedState = Arc<AppState>;

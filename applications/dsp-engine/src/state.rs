/// Shared application state
use soul_dsp_sync::DspEngine;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DspEngine>,
}

impl AppState {
    pub fn new(engine: Arc<DspEngine>) -> Self {
        Self { engine }
    }
}

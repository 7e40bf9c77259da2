//! services/api/src/web/state.rs
//!
//! Defines the application state shared by every request handler.

use prep_tracker_core::ports::RecordService;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordService>,
}

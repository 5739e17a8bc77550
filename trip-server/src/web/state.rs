//! Application state for the web layer.

use std::sync::Arc;

use crate::directions::DirectionsClient;
use crate::planner::PlannerConfig;
use crate::store::GtfsStore;

/// Shared application state.
///
/// Everything here is read-only; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// Transit feed loaded at startup
    pub store: Arc<GtfsStore>,

    /// Walking-directions client
    pub directions: Arc<DirectionsClient>,

    /// Trip planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: GtfsStore, directions: DirectionsClient, config: PlannerConfig) -> Self {
        Self {
            store: Arc::new(store),
            directions: Arc::new(directions),
            config: Arc::new(config),
        }
    }
}

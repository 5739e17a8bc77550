//! Planner configuration.

use std::time::Duration;

/// Configuration parameters for trip planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum number of candidate stops kept per side (origin/destination).
    /// Bounds the number of candidate pairs searched.
    pub max_candidates: usize,

    /// Maximum number of routes to return.
    pub max_results: usize,

    /// Multiplier applied to a transit hop's straight-line distance to get
    /// its edge weight. Below 1 so riding is preferred over walking.
    pub transit_weight_factor: f64,

    /// Maximum straight-line distance for a walking transfer (km).
    pub max_walk_km: f64,

    /// Flat weight added to every walking transfer.
    pub walk_penalty: f64,

    /// Time allowed for one walking-directions lookup (seconds).
    pub directions_timeout_secs: u64,

    /// Time allowed for a whole planning request (seconds).
    pub request_timeout_secs: u64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_candidates: usize,
        max_results: usize,
        transit_weight_factor: f64,
        max_walk_km: f64,
        walk_penalty: f64,
        directions_timeout_secs: u64,
        request_timeout_secs: u64,
    ) -> Self {
        Self {
            max_candidates,
            max_results,
            transit_weight_factor,
            max_walk_km,
            walk_penalty,
            directions_timeout_secs,
            request_timeout_secs,
        }
    }

    /// Returns the directions lookup timeout as a Duration.
    pub fn directions_timeout(&self) -> Duration {
        Duration::from_secs(self.directions_timeout_secs)
    }

    /// Returns the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_candidates: 3,
            max_results: 5,
            transit_weight_factor: 0.1,
            max_walk_km: 0.8,
            walk_penalty: 1.5,
            directions_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

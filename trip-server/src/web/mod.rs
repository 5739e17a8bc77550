//! Web layer for the trip planner.
//!
//! Provides the HTTP endpoint for planning routes between named stops.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;

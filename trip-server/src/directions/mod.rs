//! Walking directions from an external mapping provider.
//!
//! Only the approach walk to the first stop of a route is routed; every
//! other walk in a trip is drawn as a straight line. Directions are an
//! enhancement: callers treat any [`DirectionsError`] as "no directions".

mod client;
mod error;
mod types;

use std::future::Future;

pub use client::{DirectionsClient, DirectionsConfig};
pub use error::DirectionsError;
pub use types::{DirectionsResponse, WalkingDirections, WalkingStep};

use crate::domain::Coord;

/// Trait for fetching walking directions.
///
/// This abstraction allows the planner to be tested without network access.
pub trait DirectionsProvider: Send + Sync {
    /// Routed walking directions from `from` to `to`.
    fn walking_directions(
        &self,
        from: Coord,
        to: Coord,
    ) -> impl Future<Output = Result<WalkingDirections, DirectionsError>> + Send;
}

impl DirectionsProvider for DirectionsClient {
    fn walking_directions(
        &self,
        from: Coord,
        to: Coord,
    ) -> impl Future<Output = Result<WalkingDirections, DirectionsError>> + Send {
        self.fetch_walking(from, to)
    }
}

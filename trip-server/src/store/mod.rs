//! Read-only access to transit feed data.
//!
//! The planner queries stops, scheduled stop visits and shape geometry
//! through the [`TransitStore`] trait. [`GtfsStore`] answers those queries
//! from a GTFS feed directory loaded into memory at startup.

mod error;
mod gtfs;
mod records;

pub use error::StoreError;
pub use gtfs::{GtfsStore, GtfsStoreBuilder};

use crate::domain::{Coord, RouteRef, ShapeId, Stop, StopId, TripId};

/// A scheduled ride between two stops visited by the same trip.
///
/// `from_seq` is always strictly less than `to_seq`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitHop {
    pub from: StopId,
    pub to: StopId,
    pub trip_id: TripId,
    pub shape_id: Option<ShapeId>,
    pub route: RouteRef,
    pub from_seq: u32,
    pub to_seq: u32,
}

/// Trait for querying transit data.
///
/// This abstraction allows the planner to be tested with in-memory or
/// failing stores.
pub trait TransitStore: Send + Sync {
    /// Stops whose lower-cased name contains any of the (already lower-cased)
    /// needles, ordered by display name.
    fn stops_matching(&self, needles: &[&str]) -> Result<Vec<Stop>, StoreError>;

    /// Every hop between two of the given stops on a common trip, travelling
    /// forward in visit order.
    fn hops_among(&self, stops: &[StopId]) -> Result<Vec<TransitHop>, StoreError>;

    /// Points of a shape ordered by sequence. Unknown shapes yield no points.
    fn shape_points(&self, shape: &ShapeId) -> Result<Vec<Coord>, StoreError>;
}

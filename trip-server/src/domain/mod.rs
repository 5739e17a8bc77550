//! Domain types for the trip planner.
//!
//! These types represent validated transit feed data. Identifiers and
//! coordinates enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod coord;
mod ids;
mod stop;

pub use coord::{Coord, InvalidCoord};
pub use ids::{InvalidId, RouteId, ShapeId, StopId, TripId};
pub use stop::{RouteRef, Stop};

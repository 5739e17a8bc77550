//! Trip planner over a per-request stop graph.
//!
//! This module answers: "how do I get from a stop named like X to a stop
//! named like Y?"
//!
//! Stops are matched by name, a graph of transit hops and short walking
//! transfers is built over the matched stops only, and each candidate
//! origin/destination pair is searched with Dijkstra. The resulting paths
//! are split into rides and walks, ranked by transfers then distance, and
//! optionally given walking directions to their first stop.

mod config;
mod dijkstra;
mod graph;
mod rank;
mod resolve;
mod search;
mod segment;
mod shape;

pub use config::PlannerConfig;
pub use dijkstra::{PathStep, ShortestPath, shortest_path};
pub use graph::{Edge, EdgeKind, HopInfo, TransitGraph};
pub use rank::{compare_routes, rank_routes};
pub use resolve::{Candidates, Side, normalize, resolve_stops};
pub use search::{MISSING_PARAMETER, PlanError, PlanRequest, PlanResult, Planner, RouteResult, Stage};
pub use segment::{Segment, SegmentStop, segment_path};
pub use shape::{project, slice_bounds};

//! Splitting a shortest path into rides and walks.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::{Coord, RouteRef, ShapeId, Stop, StopId};
use crate::geo::polyline_length_km;

use super::dijkstra::PathStep;
use super::graph::{HopInfo, TransitGraph};
use super::shape::project;

/// A stop as shown in a segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentStop {
    pub stop_id: StopId,
    pub stop_name: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<&Stop> for SegmentStop {
    fn from(stop: &Stop) -> Self {
        Self {
            stop_id: stop.id.clone(),
            stop_name: stop.name.clone(),
            lat: stop.coord.lat,
            lon: stop.coord.lon,
        }
    }
}

/// A contiguous ride on one trip, or a walk between two stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// Visited stops in travel order. At least two.
    pub stops: Vec<SegmentStop>,

    /// Polyline drawn for this segment.
    pub shape: Vec<Coord>,

    /// The route ridden, or `None` for a walk.
    pub route: Option<RouteRef>,
}

impl Segment {
    /// Whether this segment is a transit ride.
    pub fn is_transit(&self) -> bool {
        self.route.is_some()
    }

    /// Length of the segment's polyline.
    pub fn distance_km(&self) -> f64 {
        polyline_length_km(&self.shape)
    }
}

/// Segment under construction.
struct OpenSegment<'g> {
    stops: Vec<&'g Stop>,
    hop: Option<Arc<HopInfo>>,
}

impl OpenSegment<'_> {
    fn continues(&self, via: Option<&Arc<HopInfo>>) -> bool {
        match (&self.hop, via) {
            (Some(current), Some(next)) => current.trip_id == next.trip_id,
            _ => false,
        }
    }

    fn finish(self, shapes: &HashMap<ShapeId, Vec<Coord>>) -> Segment {
        let full = self
            .hop
            .as_ref()
            .and_then(|hop| hop.shape_id.as_ref())
            .and_then(|id| shapes.get(id))
            .filter(|points| !points.is_empty());

        // Walks, and rides without usable geometry, go straight through the stops
        let shape = match (full, self.stops.first(), self.stops.last()) {
            (Some(full), Some(first), Some(last)) => project(full, first.coord, last.coord),
            _ => self.stops.iter().map(|s| s.coord).collect(),
        };

        Segment {
            stops: self.stops.into_iter().map(SegmentStop::from).collect(),
            shape,
            route: self.hop.map(|hop| hop.route.clone()),
        }
    }
}

/// Group a path's steps into segments.
///
/// Consecutive hops on the same trip form one ride. Every walking step is
/// its own two-stop segment. Each new segment begins at the stop where the
/// previous one ended. Steps whose stops are not in `graph` are skipped.
///
/// A transit segment's polyline is its trip's shape cut between the
/// segment's first and last stops; if the shape is unknown or empty the
/// stops' own coordinates are used instead.
pub fn segment_path(
    steps: &[PathStep],
    graph: &TransitGraph,
    shapes: &HashMap<ShapeId, Vec<Coord>>,
) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut open: Option<OpenSegment<'_>> = None;

    for pair in steps.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);
        let (Some(prev_stop), Some(stop)) = (graph.stop(&prev.stop), graph.stop(&current.stop))
        else {
            continue;
        };

        let continues = open
            .as_ref()
            .is_some_and(|seg| seg.continues(current.via.as_ref()));

        if continues {
            if let Some(seg) = open.as_mut() {
                seg.stops.push(stop);
            }
        } else {
            if let Some(seg) = open.take() {
                segments.push(seg.finish(shapes));
            }
            open = Some(OpenSegment {
                stops: vec![prev_stop, stop],
                hop: current.via.clone(),
            });
        }
    }

    if let Some(seg) = open {
        segments.push(seg.finish(shapes));
    }

    segments
}

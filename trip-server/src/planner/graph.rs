//! Per-request multimodal graph over the matched stops.
//!
//! Nodes are the stops matched by name for one request; the graph is not
//! expanded to stops that were not matched. Two kinds of directed edges
//! connect them:
//!
//! - transit hops, one per scheduled (from, to) visit pair of a trip,
//!   weighted by a discounted straight-line distance;
//! - walking transfers between any two stops within walking range, in both
//!   directions, weighted by distance plus a flat penalty.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{RouteRef, ShapeId, Stop, StopId, TripId};
use crate::geo::distance_km;
use crate::store::TransitHop;

use super::config::PlannerConfig;

/// Trip data carried by a transit edge.
#[derive(Debug, Clone, PartialEq)]
pub struct HopInfo {
    pub trip_id: TripId,
    pub shape_id: Option<ShapeId>,
    pub route: RouteRef,
    pub from_seq: u32,
    pub to_seq: u32,
}

/// What an edge represents.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeKind {
    /// Riding a scheduled trip.
    Transit(Arc<HopInfo>),
    /// Walking between nearby stops.
    Walk,
}

/// A directed, weighted edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: StopId,
    pub weight: f64,
    pub kind: EdgeKind,
}

impl Edge {
    /// The trip data, for transit edges.
    pub fn hop(&self) -> Option<&Arc<HopInfo>> {
        match &self.kind {
            EdgeKind::Transit(hop) => Some(hop),
            EdgeKind::Walk => None,
        }
    }
}

/// Weighted directed graph over a closed set of stops.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    stops: HashMap<StopId, Stop>,
    edges: HashMap<StopId, Vec<Edge>>,
}

impl TransitGraph {
    /// Create a graph with the given nodes and no edges.
    pub fn with_stops(stops: &[Stop]) -> Self {
        Self {
            stops: stops.iter().map(|s| (s.id.clone(), s.clone())).collect(),
            edges: HashMap::new(),
        }
    }

    /// Build the graph for one request.
    ///
    /// Hops touching a stop outside `stops` are ignored. Given the same
    /// inputs in the same order, the edge lists are identical.
    pub fn build(stops: &[Stop], hops: Vec<TransitHop>, config: &PlannerConfig) -> Self {
        let mut graph = Self::with_stops(stops);

        for hop in hops {
            let (Some(from), Some(to)) = (graph.stops.get(&hop.from), graph.stops.get(&hop.to))
            else {
                continue;
            };
            let weight = distance_km(from.coord, to.coord) * config.transit_weight_factor;
            let edge = Edge {
                target: hop.to,
                weight,
                kind: EdgeKind::Transit(Arc::new(HopInfo {
                    trip_id: hop.trip_id,
                    shape_id: hop.shape_id,
                    route: hop.route,
                    from_seq: hop.from_seq,
                    to_seq: hop.to_seq,
                })),
            };
            graph.add_edge(hop.from, edge);
        }

        for a in stops {
            for b in stops {
                if a.id == b.id {
                    continue;
                }
                let d = distance_km(a.coord, b.coord);
                if d <= config.max_walk_km {
                    graph.add_edge(
                        a.id.clone(),
                        Edge {
                            target: b.id.clone(),
                            weight: d + config.walk_penalty,
                            kind: EdgeKind::Walk,
                        },
                    );
                }
            }
        }

        graph
    }

    /// Add a directed edge. Weights must be non-negative.
    pub fn add_edge(&mut self, from: StopId, edge: Edge) {
        debug_assert!(edge.weight >= 0.0, "negative edge weight");
        self.edges.entry(from).or_default().push(edge);
    }

    /// Whether `id` is a node of this graph.
    pub fn contains(&self, id: &StopId) -> bool {
        self.stops.contains_key(id)
    }

    /// The stop record for a node.
    pub fn stop(&self, id: &StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    /// Outgoing edges of a node.
    pub fn edges_from(&self, id: &StopId) -> &[Edge] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.stops.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coord, RouteId};

    fn id(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn stop(s: &str, lat: f64, lon: f64) -> Stop {
        Stop::new(id(s), s, Coord::new(lat, lon))
    }

    fn hop(from: &str, to: &str, trip: &str, from_seq: u32, to_seq: u32) -> TransitHop {
        TransitHop {
            from: id(from),
            to: id(to),
            trip_id: TripId::parse(trip).unwrap(),
            shape_id: None,
            route: RouteRef {
                route_id: RouteId::parse("R1").unwrap(),
                route_short_name: "1".into(),
                route_long_name: "Line 1".into(),
            },
            from_seq,
            to_seq,
        }
    }

    #[test]
    fn transit_edges_are_discounted() {
        // ~11 km apart: too far to walk
        let stops = [stop("A", 0.0, 0.0), stop("B", 0.0, 0.1)];
        let graph = TransitGraph::build(
            &stops,
            vec![hop("A", "B", "T1", 1, 2)],
            &PlannerConfig::default(),
        );

        let edges = graph.edges_from(&id("A"));
        assert_eq!(edges.len(), 1);
        let expected = distance_km(stops[0].coord, stops[1].coord) * 0.1;
        assert!((edges[0].weight - expected).abs() < 1e-12);
        assert_eq!(edges[0].hop().unwrap().trip_id.as_str(), "T1");

        // No reverse travel along the trip
        assert!(graph.edges_from(&id("B")).is_empty());
    }

    #[test]
    fn walking_edges_are_symmetric_and_penalised() {
        // ~0.56 km apart
        let stops = [stop("A", 0.0, 0.0), stop("B", 0.0, 0.005)];
        let graph = TransitGraph::build(&stops, vec![], &PlannerConfig::default());

        let ab = graph.edges_from(&id("A"));
        let ba = graph.edges_from(&id("B"));
        assert_eq!(ab.len(), 1);
        assert_eq!(ba.len(), 1);
        assert_eq!(ab[0].kind, EdgeKind::Walk);
        assert_eq!(ab[0].weight, ba[0].weight);

        let expected = distance_km(stops[0].coord, stops[1].coord) + 1.5;
        assert!((ab[0].weight - expected).abs() < 1e-12);
    }

    #[test]
    fn no_walking_edge_beyond_range() {
        // ~0.89 km apart
        let stops = [stop("A", 0.0, 0.0), stop("B", 0.0, 0.008)];
        let graph = TransitGraph::build(&stops, vec![], &PlannerConfig::default());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn hops_outside_closure_are_ignored() {
        let stops = [stop("A", 0.0, 0.0)];
        let graph = TransitGraph::build(
            &stops,
            vec![hop("A", "Z", "T1", 1, 2)],
            &PlannerConfig::default(),
        );
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn parallel_trips_give_parallel_edges() {
        let stops = [stop("A", 0.0, 0.0), stop("B", 0.0, 0.1)];
        let graph = TransitGraph::build(
            &stops,
            vec![hop("A", "B", "T1", 1, 2), hop("A", "B", "T2", 4, 9)],
            &PlannerConfig::default(),
        );
        assert_eq!(graph.edges_from(&id("A")).len(), 2);
    }

    #[test]
    fn building_is_deterministic() {
        let stops = [
            stop("A", 0.0, 0.0),
            stop("B", 0.0, 0.003),
            stop("C", 0.0, 0.006),
        ];
        let hops = || vec![hop("A", "C", "T1", 1, 3), hop("B", "C", "T1", 2, 3)];
        let config = PlannerConfig::default();

        let g1 = TransitGraph::build(&stops, hops(), &config);
        let g2 = TransitGraph::build(&stops, hops(), &config);

        for s in &stops {
            assert_eq!(g1.edges_from(&s.id), g2.edges_from(&s.id));
        }
    }
}

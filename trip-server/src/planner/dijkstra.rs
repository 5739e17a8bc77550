//! Single-pair shortest path over a [`TransitGraph`].
//!
//! Equal-cost heap entries are popped in ascending stop id order, so a
//! given graph always yields the same path even when several shortest
//! paths exist.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use crate::domain::StopId;

use super::graph::{HopInfo, TransitGraph};

/// One visited stop on a shortest path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    pub stop: StopId,
    /// The transit hop used to reach this stop. `None` for a walking
    /// transfer and for the first step.
    pub via: Option<Arc<HopInfo>>,
}

/// A shortest path from start to end, inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    pub cost: f64,
    pub steps: Vec<PathStep>,
}

#[derive(Debug, Clone, PartialEq)]
struct State {
    cost: f64,
    stop: StopId,
}

impl Eq for State {}

// Min-heap by cost, then by stop id
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.stop.cmp(&self.stop))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// How a node was first reached at its best known cost.
struct Predecessor {
    stop: StopId,
    via: Option<Arc<HopInfo>>,
}

/// Find a least-cost path from `start` to `end`.
///
/// Returns `None` if `end` is unreachable or either endpoint is not in the
/// graph. Stale heap entries are skipped on pop rather than removed.
pub fn shortest_path(graph: &TransitGraph, start: &StopId, end: &StopId) -> Option<ShortestPath> {
    if !graph.contains(start) || !graph.contains(end) {
        return None;
    }

    let mut distances: HashMap<StopId, f64> = HashMap::new();
    let mut predecessors: HashMap<StopId, Predecessor> = HashMap::new();
    let mut heap = BinaryHeap::new();

    distances.insert(start.clone(), 0.0);
    heap.push(State {
        cost: 0.0,
        stop: start.clone(),
    });

    while let Some(State { cost, stop }) = heap.pop() {
        if &stop == end {
            break;
        }

        if distances.get(&stop).is_some_and(|&best| cost > best) {
            continue;
        }

        for edge in graph.edges_from(&stop) {
            let next_cost = cost + edge.weight;

            let improved = match distances.entry(edge.target.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    true
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        entry.insert(next_cost);
                        true
                    } else {
                        false
                    }
                }
            };

            if improved {
                predecessors.insert(
                    edge.target.clone(),
                    Predecessor {
                        stop: stop.clone(),
                        via: edge.hop().cloned(),
                    },
                );
                heap.push(State {
                    cost: next_cost,
                    stop: edge.target.clone(),
                });
            }
        }
    }

    let cost = *distances.get(end)?;

    let mut steps = Vec::new();
    let mut current = end.clone();
    while let Some(pred) = predecessors.get(&current) {
        let prev = pred.stop.clone();
        steps.push(PathStep {
            stop: current,
            via: pred.via.clone(),
        });
        current = prev;
        if &current == start {
            break;
        }
    }
    steps.push(PathStep {
        stop: start.clone(),
        via: None,
    });
    steps.reverse();

    Some(ShortestPath { cost, steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coord, RouteId, RouteRef, Stop, TripId};
    use crate::planner::graph::{Edge, EdgeKind};

    fn id(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn graph(ids: &[&str]) -> TransitGraph {
        let stops: Vec<Stop> = ids
            .iter()
            .map(|s| Stop::new(id(s), *s, Coord::new(0.0, 0.0)))
            .collect();
        TransitGraph::with_stops(&stops)
    }

    fn ride(trip: &str) -> EdgeKind {
        EdgeKind::Transit(Arc::new(HopInfo {
            trip_id: TripId::parse(trip).unwrap(),
            shape_id: None,
            route: RouteRef {
                route_id: RouteId::parse("R").unwrap(),
                route_short_name: "R".into(),
                route_long_name: "Route".into(),
            },
            from_seq: 1,
            to_seq: 2,
        }))
    }

    fn edge(g: &mut TransitGraph, from: &str, to: &str, weight: f64, kind: EdgeKind) {
        g.add_edge(
            id(from),
            Edge {
                target: id(to),
                weight,
                kind,
            },
        );
    }

    fn stops(path: &ShortestPath) -> Vec<&str> {
        path.steps.iter().map(|s| s.stop.as_str()).collect()
    }

    #[test]
    fn finds_cheapest_path() {
        let mut g = graph(&["A", "B", "C"]);
        edge(&mut g, "A", "C", 5.0, ride("T1"));
        edge(&mut g, "A", "B", 1.0, ride("T2"));
        edge(&mut g, "B", "C", 1.0, EdgeKind::Walk);

        let path = shortest_path(&g, &id("A"), &id("C")).unwrap();
        assert_eq!(stops(&path), ["A", "B", "C"]);
        assert_eq!(path.cost, 2.0);
        assert!(path.steps[0].via.is_none());
        assert_eq!(path.steps[1].via.as_ref().unwrap().trip_id.as_str(), "T2");
        assert!(path.steps[2].via.is_none());
    }

    #[test]
    fn unreachable_end_is_none() {
        let mut g = graph(&["A", "B", "C"]);
        edge(&mut g, "A", "B", 1.0, EdgeKind::Walk);
        assert!(shortest_path(&g, &id("A"), &id("C")).is_none());
    }

    #[test]
    fn unknown_endpoint_is_none() {
        let g = graph(&["A"]);
        assert!(shortest_path(&g, &id("A"), &id("Z")).is_none());
        assert!(shortest_path(&g, &id("Z"), &id("A")).is_none());
    }

    #[test]
    fn start_equals_end_is_single_step() {
        let g = graph(&["A"]);
        let path = shortest_path(&g, &id("A"), &id("A")).unwrap();
        assert_eq!(stops(&path), ["A"]);
        assert_eq!(path.cost, 0.0);
    }

    #[test]
    fn equal_cost_ties_prefer_lower_stop_id() {
        // A -> B -> D and A -> C -> D cost the same
        let mut g = graph(&["A", "B", "C", "D"]);
        edge(&mut g, "A", "C", 1.0, EdgeKind::Walk);
        edge(&mut g, "A", "B", 1.0, EdgeKind::Walk);
        edge(&mut g, "C", "D", 1.0, EdgeKind::Walk);
        edge(&mut g, "B", "D", 1.0, EdgeKind::Walk);

        for _ in 0..5 {
            let path = shortest_path(&g, &id("A"), &id("D")).unwrap();
            assert_eq!(stops(&path), ["A", "B", "D"]);
        }
    }

    #[test]
    fn stale_entries_are_skipped() {
        let mut g = graph(&["A", "B", "C", "D"]);
        edge(&mut g, "A", "B", 10.0, EdgeKind::Walk);
        edge(&mut g, "A", "C", 1.0, EdgeKind::Walk);
        edge(&mut g, "C", "B", 1.0, EdgeKind::Walk);
        edge(&mut g, "B", "D", 1.0, EdgeKind::Walk);

        let path = shortest_path(&g, &id("A"), &id("D")).unwrap();
        assert_eq!(stops(&path), ["A", "C", "B", "D"]);
        assert_eq!(path.cost, 3.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Coord, Stop};
    use crate::planner::graph::{Edge, EdgeKind};
    use proptest::prelude::*;

    const NODES: usize = 5;

    fn id(i: usize) -> StopId {
        StopId::parse(&format!("S{i}")).unwrap()
    }

    fn build(edges: &[(usize, usize, u8)]) -> TransitGraph {
        let stops: Vec<Stop> = (0..NODES)
            .map(|i| Stop::new(id(i), format!("S{i}"), Coord::new(0.0, 0.0)))
            .collect();
        let mut g = TransitGraph::with_stops(&stops);
        for &(from, to, w) in edges {
            if from != to {
                g.add_edge(
                    id(from),
                    Edge {
                        target: id(to),
                        weight: f64::from(w),
                        kind: EdgeKind::Walk,
                    },
                );
            }
        }
        g
    }

    /// Exhaustive search over simple paths.
    fn brute_force(g: &TransitGraph, at: &StopId, end: &StopId, seen: &mut Vec<StopId>) -> Option<f64> {
        if at == end {
            return Some(0.0);
        }
        seen.push(at.clone());
        let mut best: Option<f64> = None;
        for e in g.edges_from(at) {
            if seen.contains(&e.target) {
                continue;
            }
            if let Some(rest) = brute_force(g, &e.target, end, seen) {
                let total = e.weight + rest;
                best = Some(best.map_or(total, |b| b.min(total)));
            }
        }
        seen.pop();
        best
    }

    fn edges_strategy() -> impl Strategy<Value = Vec<(usize, usize, u8)>> {
        prop::collection::vec((0..NODES, 0..NODES, 0u8..20), 0..16)
    }

    proptest! {
        #[test]
        fn matches_brute_force(edges in edges_strategy(), start in 0..NODES, end in 0..NODES) {
            let g = build(&edges);
            let expected = brute_force(&g, &id(start), &id(end), &mut Vec::new());
            let found = shortest_path(&g, &id(start), &id(end));

            match (expected, found) {
                (None, None) => {}
                (Some(cost), Some(path)) => {
                    prop_assert_eq!(path.cost, cost);
                }
                (expected, found) => {
                    prop_assert!(false, "expected {:?}, found {:?}", expected, found);
                }
            }
        }

        #[test]
        fn path_follows_graph_edges(edges in edges_strategy(), start in 0..NODES, end in 0..NODES) {
            let g = build(&edges);
            if let Some(path) = shortest_path(&g, &id(start), &id(end)) {
                prop_assert_eq!(&path.steps[0].stop, &id(start));
                prop_assert_eq!(&path.steps[path.steps.len() - 1].stop, &id(end));

                let mut total = 0.0;
                for pair in path.steps.windows(2) {
                    let cheapest = g
                        .edges_from(&pair[0].stop)
                        .iter()
                        .filter(|e| e.target == pair[1].stop)
                        .map(|e| e.weight)
                        .fold(f64::INFINITY, f64::min);
                    prop_assert!(cheapest.is_finite());
                    total += cheapest;
                }
                prop_assert_eq!(total, path.cost);
            }
        }
    }
}

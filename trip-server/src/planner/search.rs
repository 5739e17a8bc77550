//! Trip search: from two free-text stop names to ranked routes.
//!
//! One request runs entirely against data fetched for it: stops are
//! resolved by name, a graph is built over the matched stops, and every
//! (origin, destination) candidate pair is searched. Nothing is shared
//! between requests.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use futures::future::join_all;
use tokio::task::JoinError;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::directions::{DirectionsError, DirectionsProvider, WalkingDirections};
use crate::domain::{Coord, ShapeId, Stop, StopId};
use crate::store::{StoreError, TransitStore};

use super::config::PlannerConfig;
use super::dijkstra::{PathStep, shortest_path};
use super::graph::TransitGraph;
use super::rank::rank_routes;
use super::resolve::{Side, normalize, resolve_stops};
use super::segment::{Segment, segment_path};

/// The point of a request at which the transit store failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Graph,
    Shapes,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Resolve => f.write_str("resolving stops"),
            Stage::Graph => f.write_str("building graph"),
            Stage::Shapes => f.write_str("loading shapes"),
        }
    }
}

/// Error from trip planning.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Origin or destination text is missing
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No stop name matched one or both texts
    #[error("No matching stops found for {0}")]
    NoMatchingStops(Side),

    /// The transit store failed; the request cannot continue
    #[error("transit store failed while {stage}: {source}")]
    Store {
        stage: Stage,
        #[source]
        source: StoreError,
    },

    /// Planning did not finish in time
    #[error("planning timed out")]
    Timeout,

    /// The route search task panicked or was cancelled
    #[error("route search failed: {0}")]
    Search(#[from] JoinError),
}

/// Wrap a store error, logging the stage it happened in.
pub(super) fn store_failure(stage: Stage, source: StoreError) -> PlanError {
    error!(stage = %stage, error = %source, "Transit store query failed");
    PlanError::Store { stage, source }
}

/// Message for a request without usable origin or destination text.
pub const MISSING_PARAMETER: &str = "Missing 'from' or 'to' parameter";

/// Request for trip planning.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Free text matched against origin stop names.
    pub origin: String,

    /// Free text matched against destination stop names.
    pub destination: String,

    /// Where the traveller is now, for walking directions to the first stop.
    pub user_position: Option<Coord>,
}

impl PlanRequest {
    /// Create a new request without a user position.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            user_position: None,
        }
    }

    /// Attach the traveller's current position.
    pub fn with_user_position(mut self, position: Coord) -> Self {
        self.user_position = Some(position);
        self
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.origin.trim().is_empty() || self.destination.trim().is_empty() {
            return Err(PlanError::InvalidRequest(MISSING_PARAMETER.to_string()));
        }
        Ok(())
    }
}

/// One way to get from an origin candidate to a destination candidate.
#[derive(Debug, Clone)]
pub struct RouteResult {
    pub origin: Stop,
    pub destination: Stop,
    pub segments: Vec<Segment>,

    /// Routed walk from the user's position to `origin`, when available.
    pub walking_directions: Option<WalkingDirections>,

    /// Transit rides minus one, never negative.
    pub total_transfers: usize,

    /// Length of all segment polylines in km, rounded to two decimals.
    pub total_distance: f64,
}

impl RouteResult {
    /// Create a result, computing its metrics from the segments.
    pub fn new(origin: Stop, destination: Stop, segments: Vec<Segment>) -> Self {
        let rides = segments.iter().filter(|s| s.is_transit()).count();
        let distance: f64 = segments.iter().map(Segment::distance_km).sum();

        Self {
            origin,
            destination,
            segments,
            walking_directions: None,
            total_transfers: rides.saturating_sub(1),
            total_distance: round_to_hundredths(distance),
        }
    }
}

fn round_to_hundredths(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Result of trip planning.
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// Found routes, ranked best-first.
    pub routes: Vec<RouteResult>,

    /// Number of candidate pairs searched.
    pub pairs_considered: usize,
}

impl PlanResult {
    /// Whether no candidate pair produced a route.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Trip planner over a transit store and a directions provider.
pub struct Planner<'a, S: TransitStore, D: DirectionsProvider> {
    store: Arc<S>,
    directions: &'a D,
    config: &'a PlannerConfig,
}

impl<'a, S: TransitStore + 'static, D: DirectionsProvider> Planner<'a, S, D> {
    /// Create a new planner.
    pub fn new(store: Arc<S>, directions: &'a D, config: &'a PlannerConfig) -> Self {
        Self {
            store,
            directions,
            config,
        }
    }

    /// Plan routes for a request.
    ///
    /// Finding no route is not an error: the result is simply empty. The
    /// whole request, store reads included, is bounded by the configured
    /// request timeout.
    pub async fn plan(&self, request: &PlanRequest) -> Result<PlanResult, PlanError> {
        request.validate()?;

        let limit = self.config.request_timeout();
        timeout(limit, self.plan_routes(request))
            .await
            .unwrap_or_else(|_| {
                warn!(limit_secs = limit.as_secs(), "Planning timed out");
                Err(PlanError::Timeout)
            })
    }

    async fn plan_routes(&self, request: &PlanRequest) -> Result<PlanResult, PlanError> {
        info!(
            origin = %request.origin,
            destination = %request.destination,
            "Planning trip"
        );

        // Store reads and path search block, so they run off the runtime
        let store = Arc::clone(&self.store);
        let config = self.config.clone();
        let origin = normalize(&request.origin);
        let destination = normalize(&request.destination);
        let (routes, pairs_considered) = tokio::task::spawn_blocking(move || {
            search_routes(store.as_ref(), &origin, &destination, &config)
        })
        .await??;

        let mut routes = rank_routes(routes);
        routes.truncate(self.config.max_results);

        if let Some(position) = request.user_position {
            self.attach_directions(position, &mut routes).await;
        }

        info!(routes = routes.len(), pairs_considered, "Planning complete");

        Ok(PlanResult {
            routes,
            pairs_considered,
        })
    }

    /// Look up walking directions from `from` to each distinct origin stop,
    /// concurrently, and attach them to the routes. Failed lookups leave
    /// the field empty.
    async fn attach_directions(&self, from: Coord, routes: &mut [RouteResult]) {
        let mut origins: Vec<(StopId, Coord)> = Vec::new();
        for route in routes.iter() {
            if !origins.iter().any(|(id, _)| id == &route.origin.id) {
                origins.push((route.origin.id.clone(), route.origin.coord));
            }
        }

        let limit = self.config.directions_timeout();
        let lookups = origins.into_iter().map(|(stop, to)| async move {
            let result = timeout(limit, self.directions.walking_directions(from, to))
                .await
                .unwrap_or_else(|_| Err(DirectionsError::Timeout(limit)));
            (stop, result)
        });

        let mut found: HashMap<StopId, WalkingDirections> = HashMap::new();
        for (stop, result) in join_all(lookups).await {
            match result {
                Ok(directions) => {
                    found.insert(stop, directions);
                }
                Err(DirectionsError::NotConfigured(reason)) => {
                    debug!(stop = %stop, reason = %reason, "Walking directions disabled");
                }
                Err(e) => {
                    warn!(stop = %stop, error = %e, "Walking directions unavailable");
                }
            }
        }

        for route in routes {
            route.walking_directions = found.get(&route.origin.id).cloned();
        }
    }
}

/// Resolve stops, build the graph and search every candidate pair.
///
/// Returns the unranked routes and the number of pairs searched. Texts
/// must already be normalized.
fn search_routes<S: TransitStore>(
    store: &S,
    origin: &str,
    destination: &str,
    config: &PlannerConfig,
) -> Result<(Vec<RouteResult>, usize), PlanError> {
    let candidates = resolve_stops(store, origin, destination, config.max_candidates)?;

    let stop_ids: Vec<StopId> = candidates.matched.iter().map(|s| s.id.clone()).collect();
    let hops = store
        .hops_among(&stop_ids)
        .map_err(|e| store_failure(Stage::Graph, e))?;
    let graph = TransitGraph::build(&candidates.matched, hops, config);

    debug!(
        origins = candidates.origins.len(),
        destinations = candidates.destinations.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Built graph"
    );

    let mut shapes: HashMap<ShapeId, Vec<Coord>> = HashMap::new();
    let mut routes = Vec::new();
    let mut pairs_considered = 0;

    for origin in &candidates.origins {
        for destination in &candidates.destinations {
            pairs_considered += 1;

            let Some(path) = shortest_path(&graph, &origin.id, &destination.id) else {
                debug!(from = %origin.id, to = %destination.id, "No path, skipping pair");
                continue;
            };
            if path.steps.len() < 2 {
                debug!(stop = %origin.id, "Origin is destination, skipping pair");
                continue;
            }

            load_shapes(store, &path.steps, &mut shapes)?;
            let segments = segment_path(&path.steps, &graph, &shapes);
            if segments.is_empty() {
                continue;
            }

            routes.push(RouteResult::new(
                origin.clone(),
                destination.clone(),
                segments,
            ));
        }
    }

    Ok((routes, pairs_considered))
}

/// Fetch the shapes used by a path that are not loaded yet.
fn load_shapes<S: TransitStore>(
    store: &S,
    steps: &[PathStep],
    shapes: &mut HashMap<ShapeId, Vec<Coord>>,
) -> Result<(), PlanError> {
    let used = steps
        .iter()
        .filter_map(|step| step.via.as_ref()?.shape_id.as_ref());

    for shape_id in used {
        if shapes.contains_key(shape_id) {
            continue;
        }
        let points = store
            .shape_points(shape_id)
            .map_err(|e| store_failure(Stage::Shapes, e))?;
        shapes.insert(shape_id.clone(), points);
    }
    Ok(())
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;

//! In-memory transit store loaded from a GTFS feed directory.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Display;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::domain::{Coord, RouteId, RouteRef, ShapeId, Stop, StopId, TripId};

use super::error::StoreError;
use super::records::{RouteRecord, ShapeRecord, StopRecord, StopTimeRecord, TripRecord};
use super::{TransitHop, TransitStore};

/// Route and shape a trip runs on.
#[derive(Debug, Clone)]
struct TripInfo {
    route_id: RouteId,
    shape_id: Option<ShapeId>,
}

/// Transit data indexed in memory.
///
/// Built once (from a feed directory or a [`GtfsStoreBuilder`]) and then
/// only read, so it can be shared between concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct GtfsStore {
    /// Sorted by (name, id).
    stops: Vec<Stop>,
    routes: HashMap<RouteId, RouteRef>,
    trips: HashMap<TripId, TripInfo>,
    /// Per-trip visits sorted by sequence.
    visits: BTreeMap<TripId, Vec<(u32, StopId)>>,
    /// Per-shape points sorted by sequence.
    shapes: HashMap<ShapeId, Vec<(u32, Coord)>>,
}

impl GtfsStore {
    /// Load a feed from a directory.
    ///
    /// `stops.txt`, `routes.txt`, `trips.txt` and `stop_times.txt` are
    /// required; `shapes.txt` is optional.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        let mut store = Self::default();

        for r in read_records::<StopRecord>(dir, "stops.txt", true)? {
            let id = StopId::parse(&r.stop_id).map_err(|e| invalid("stops.txt", e))?;
            let coord =
                Coord::parse(r.stop_lat, r.stop_lon).map_err(|e| invalid("stops.txt", e))?;
            store.stops.push(Stop::new(id, r.stop_name, coord));
        }

        for r in read_records::<RouteRecord>(dir, "routes.txt", true)? {
            let route_id = RouteId::parse(&r.route_id).map_err(|e| invalid("routes.txt", e))?;
            store.insert_route(RouteRef {
                route_id,
                route_short_name: r.route_short_name,
                route_long_name: r.route_long_name,
            });
        }

        for r in read_records::<TripRecord>(dir, "trips.txt", true)? {
            let trip_id = TripId::parse(&r.trip_id).map_err(|e| invalid("trips.txt", e))?;
            let route_id = RouteId::parse(&r.route_id).map_err(|e| invalid("trips.txt", e))?;
            // An empty shape_id column means the trip has no geometry
            let shape_id = ShapeId::parse(&r.shape_id).ok();
            store.trips.insert(trip_id, TripInfo { route_id, shape_id });
        }

        for r in read_records::<StopTimeRecord>(dir, "stop_times.txt", true)? {
            let trip_id = TripId::parse(&r.trip_id).map_err(|e| invalid("stop_times.txt", e))?;
            let stop_id = StopId::parse(&r.stop_id).map_err(|e| invalid("stop_times.txt", e))?;
            store
                .visits
                .entry(trip_id)
                .or_default()
                .push((r.stop_sequence, stop_id));
        }

        for r in read_records::<ShapeRecord>(dir, "shapes.txt", false)? {
            let shape_id = ShapeId::parse(&r.shape_id).map_err(|e| invalid("shapes.txt", e))?;
            let coord = Coord::parse(r.shape_pt_lat, r.shape_pt_lon)
                .map_err(|e| invalid("shapes.txt", e))?;
            store
                .shapes
                .entry(shape_id)
                .or_default()
                .push((r.shape_pt_sequence, coord));
        }

        store.finish();

        info!(
            stops = store.stops.len(),
            routes = store.routes.len(),
            trips = store.trips.len(),
            shapes = store.shapes.len(),
            "loaded GTFS feed from {}",
            dir.display()
        );

        Ok(store)
    }

    /// Number of stops in the feed.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Number of trips in the feed.
    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    fn insert_route(&mut self, route: RouteRef) {
        self.routes.insert(route.route_id.clone(), route);
    }

    /// Establish the ordering invariants the queries rely on.
    fn finish(&mut self) {
        self.stops
            .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        for visits in self.visits.values_mut() {
            visits.sort_by_key(|(seq, _)| *seq);
        }
        for points in self.shapes.values_mut() {
            points.sort_by_key(|(seq, _)| *seq);
        }
    }
}

impl TransitStore for GtfsStore {
    fn stops_matching(&self, needles: &[&str]) -> Result<Vec<Stop>, StoreError> {
        Ok(self
            .stops
            .iter()
            .filter(|s| needles.iter().any(|n| s.name_contains(n)))
            .cloned()
            .collect())
    }

    fn hops_among(&self, stops: &[StopId]) -> Result<Vec<TransitHop>, StoreError> {
        let wanted: HashSet<&StopId> = stops.iter().collect();
        let mut hops = Vec::new();

        for (trip_id, visits) in &self.visits {
            // Trips without a known route are excluded, like an inner join
            let Some(trip) = self.trips.get(trip_id) else {
                continue;
            };
            let Some(route) = self.routes.get(&trip.route_id) else {
                continue;
            };

            let relevant: Vec<(u32, &StopId)> = visits
                .iter()
                .filter(|(_, stop)| wanted.contains(stop))
                .map(|(seq, stop)| (*seq, stop))
                .collect();

            for (i, &(from_seq, from)) in relevant.iter().enumerate() {
                for &(to_seq, to) in &relevant[i + 1..] {
                    if from_seq >= to_seq || from == to {
                        continue;
                    }
                    hops.push(TransitHop {
                        from: from.clone(),
                        to: to.clone(),
                        trip_id: trip_id.clone(),
                        shape_id: trip.shape_id.clone(),
                        route: route.clone(),
                        from_seq,
                        to_seq,
                    });
                }
            }
        }

        Ok(hops)
    }

    fn shape_points(&self, shape: &ShapeId) -> Result<Vec<Coord>, StoreError> {
        Ok(self
            .shapes
            .get(shape)
            .map(|points| points.iter().map(|(_, c)| *c).collect())
            .unwrap_or_default())
    }
}

/// Read every record of one feed file.
fn read_records<T: DeserializeOwned>(
    dir: &Path,
    file: &str,
    required: bool,
) -> Result<Vec<T>, StoreError> {
    let path = dir.join(file);
    if !path.is_file() {
        return if required {
            Err(StoreError::MissingFile(path))
        } else {
            Ok(Vec::new())
        };
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&path)
        .map_err(|source| StoreError::Csv {
            file: file.to_string(),
            source,
        })?;

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| StoreError::Csv {
            file: file.to_string(),
            source,
        })
}

fn invalid(file: &str, err: impl Display) -> StoreError {
    StoreError::InvalidData {
        file: file.to_string(),
        message: err.to_string(),
    }
}

/// Builder for creating an in-memory store.
///
/// Provides a fluent API for adding feed rows. Rows with empty identifiers
/// or out-of-range coordinates are ignored.
#[derive(Debug, Default)]
pub struct GtfsStoreBuilder {
    inner: GtfsStore,
}

impl GtfsStoreBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop.
    pub fn stop(mut self, id: &str, name: &str, lat: f64, lon: f64) -> Self {
        if let (Ok(id), Ok(coord)) = (StopId::parse(id), Coord::parse(lat, lon)) {
            self.inner.stops.push(Stop::new(id, name, coord));
        }
        self
    }

    /// Add a route.
    pub fn route(mut self, id: &str, short_name: &str, long_name: &str) -> Self {
        if let Ok(route_id) = RouteId::parse(id) {
            self.inner.insert_route(RouteRef {
                route_id,
                route_short_name: short_name.to_string(),
                route_long_name: long_name.to_string(),
            });
        }
        self
    }

    /// Add a trip running on `route_id`, optionally following a shape.
    pub fn trip(mut self, id: &str, route_id: &str, shape_id: Option<&str>) -> Self {
        if let (Ok(trip_id), Ok(route_id)) = (TripId::parse(id), RouteId::parse(route_id)) {
            let shape_id = shape_id.and_then(|s| ShapeId::parse(s).ok());
            self.inner
                .trips
                .insert(trip_id, TripInfo { route_id, shape_id });
        }
        self
    }

    /// Add a scheduled visit of `stop_id` by `trip_id`.
    pub fn stop_time(mut self, trip_id: &str, stop_id: &str, sequence: u32) -> Self {
        if let (Ok(trip_id), Ok(stop_id)) = (TripId::parse(trip_id), StopId::parse(stop_id)) {
            self.inner
                .visits
                .entry(trip_id)
                .or_default()
                .push((sequence, stop_id));
        }
        self
    }

    /// Add a point to a shape.
    pub fn shape_point(mut self, shape_id: &str, lat: f64, lon: f64, sequence: u32) -> Self {
        if let (Ok(shape_id), Ok(coord)) = (ShapeId::parse(shape_id), Coord::parse(lat, lon)) {
            self.inner
                .shapes
                .entry(shape_id)
                .or_default()
                .push((sequence, coord));
        }
        self
    }

    /// Build the store.
    pub fn build(self) -> GtfsStore {
        let mut store = self.inner;
        store.finish();
        store
    }
}

//! Raw GTFS CSV records.
//!
//! Only the columns the planner reads are declared; any other columns in a
//! feed file are ignored during deserialization.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct StopRecord {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct RouteRecord {
    pub route_id: String,
    #[serde(default)]
    pub route_short_name: String,
    #[serde(default)]
    pub route_long_name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct TripRecord {
    pub route_id: String,
    pub trip_id: String,
    #[serde(default)]
    pub shape_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct StopTimeRecord {
    pub trip_id: String,
    pub stop_id: String,
    pub stop_sequence: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct ShapeRecord {
    pub shape_id: String,
    pub shape_pt_lat: f64,
    pub shape_pt_lon: f64,
    pub shape_pt_sequence: u32,
}

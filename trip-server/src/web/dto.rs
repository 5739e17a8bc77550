//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::directions::WalkingDirections;
use crate::domain::{Coord, StopId};
use crate::planner::{RouteResult, Segment};

/// Query string of `GET /api/route`.
#[derive(Debug, Default, Deserialize)]
pub struct RouteQuery {
    /// Text matched against origin stop names
    pub from: Option<String>,

    /// Text matched against destination stop names
    pub to: Option<String>,

    /// Traveller latitude, for walking directions
    #[serde(rename = "userLat")]
    pub user_lat: Option<String>,

    /// Traveller longitude, for walking directions
    #[serde(rename = "userLon")]
    pub user_lon: Option<String>,
}

impl RouteQuery {
    /// The traveller's position, if both coordinates were given.
    ///
    /// Blank values count as absent. Values that are present but not a
    /// valid coordinate are an error.
    pub fn user_position(&self) -> Result<Option<Coord>, String> {
        let lat = self.user_lat.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let lon = self.user_lon.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let (Some(lat), Some(lon)) = (lat, lon) else {
            return Ok(None);
        };

        let invalid = || format!("Invalid user position: {lat},{lon}");
        let lat: f64 = lat.parse().map_err(|_| invalid())?;
        let lon: f64 = lon.parse().map_err(|_| invalid())?;
        Coord::parse(lat, lon)
            .map(Some)
            .map_err(|e| e.to_string())
    }
}

/// A planned route as returned to clients.
#[derive(Debug, Serialize)]
pub struct RouteResultDto {
    pub from_stop: String,
    pub to_stop: String,
    pub from_stop_id: StopId,
    pub to_stop_id: StopId,
    pub segments: Vec<Segment>,

    #[serde(rename = "walkingDirections")]
    pub walking_directions: Option<WalkingDirections>,

    #[serde(rename = "totalTransfers")]
    pub total_transfers: usize,

    #[serde(rename = "totalDistance")]
    pub total_distance: f64,
}

impl From<RouteResult> for RouteResultDto {
    fn from(route: RouteResult) -> Self {
        Self {
            from_stop: route.origin.name,
            to_stop: route.destination.name,
            from_stop_id: route.origin.id,
            to_stop_id: route.destination.id,
            segments: route.segments,
            walking_directions: route.walking_directions,
            total_transfers: route.total_transfers,
            total_distance: route.total_distance,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteId, RouteRef, Stop};
    use crate::planner::SegmentStop;
    use serde_json::json;

    fn query(lat: Option<&str>, lon: Option<&str>) -> RouteQuery {
        RouteQuery {
            from: Some("a".into()),
            to: Some("b".into()),
            user_lat: lat.map(String::from),
            user_lon: lon.map(String::from),
        }
    }

    #[test]
    fn user_position_needs_both_coordinates() {
        assert_eq!(query(None, None).user_position(), Ok(None));
        assert_eq!(query(Some("-33.4"), None).user_position(), Ok(None));
        assert_eq!(query(Some(" "), Some("-70.6")).user_position(), Ok(None));
        assert_eq!(
            query(Some("-33.4"), Some("-70.6")).user_position(),
            Ok(Some(Coord::new(-33.4, -70.6)))
        );
    }

    #[test]
    fn user_position_rejects_garbage() {
        assert!(query(Some("north"), Some("-70.6")).user_position().is_err());
        assert!(query(Some("95"), Some("-70.6")).user_position().is_err());
    }

    #[test]
    fn route_result_field_names() {
        let stop = |id: &str, name: &str, lon: f64| {
            Stop::new(StopId::parse(id).unwrap(), name, Coord::new(0.0, lon))
        };
        let a = stop("A", "Alameda", 0.0);
        let b = stop("B", "Baquedano", 0.01);

        let segment = Segment {
            stops: vec![SegmentStop::from(&a), SegmentStop::from(&b)],
            shape: vec![a.coord, b.coord],
            route: Some(RouteRef {
                route_id: RouteId::parse("R1").unwrap(),
                route_short_name: "L1".into(),
                route_long_name: "Linea 1".into(),
            }),
        };
        let dto = RouteResultDto::from(RouteResult::new(a, b, vec![segment]));

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            value,
            json!({
                "from_stop": "Alameda",
                "to_stop": "Baquedano",
                "from_stop_id": "A",
                "to_stop_id": "B",
                "segments": [{
                    "stops": [
                        {"stop_id": "A", "stop_name": "Alameda", "lat": 0.0, "lon": 0.0},
                        {"stop_id": "B", "stop_name": "Baquedano", "lat": 0.0, "lon": 0.01}
                    ],
                    "shape": [{"lat": 0.0, "lon": 0.0}, {"lat": 0.0, "lon": 0.01}],
                    "route": {
                        "route_id": "R1",
                        "route_short_name": "L1",
                        "route_long_name": "Linea 1"
                    }
                }],
                "walkingDirections": null,
                "totalTransfers": 0,
                "totalDistance": 1.11
            })
        );
    }

    #[test]
    fn walking_segment_has_null_route() {
        let segment = Segment {
            stops: Vec::new(),
            shape: Vec::new(),
            route: None,
        };
        let value = serde_json::to_value(&segment).unwrap();
        assert_eq!(value["route"], serde_json::Value::Null);
    }
}

//! Stops and route references.

use serde::Serialize;

use super::{Coord, RouteId, StopId};

/// A physical boarding/alighting location.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub coord: Coord,
}

impl Stop {
    /// Create a new stop.
    pub fn new(id: StopId, name: impl Into<String>, coord: Coord) -> Self {
        Self {
            id,
            name: name.into(),
            coord,
        }
    }

    /// Whether the lower-cased display name contains an already-normalized needle.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

/// The route a transit ride belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRef {
    pub route_id: RouteId,
    pub route_short_name: String,
    pub route_long_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_contains_is_case_insensitive_on_stop_side() {
        let stop = Stop::new(
            StopId::parse("S1").unwrap(),
            "Plaza Italia",
            Coord::new(0.0, 0.0),
        );
        assert!(stop.name_contains("italia"));
        assert!(stop.name_contains("plaza it"));
        assert!(!stop.name_contains("baquedano"));
    }
}

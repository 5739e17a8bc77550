//! Free-text origin/destination to candidate stops.

use std::fmt;

use crate::domain::Stop;
use crate::store::TransitStore;

use super::search::{PlanError, Stage, store_failure};

/// Which side(s) of a request failed to match any stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Origin,
    Destination,
    Both,
}

impl Side {
    /// The side that missed, if any.
    fn from_misses(origin_missed: bool, destination_missed: bool) -> Option<Self> {
        match (origin_missed, destination_missed) {
            (true, true) => Some(Side::Both),
            (true, false) => Some(Side::Origin),
            (false, true) => Some(Side::Destination),
            (false, false) => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Origin => f.write_str("origin"),
            Side::Destination => f.write_str("destination"),
            Side::Both => f.write_str("origin and destination"),
        }
    }
}

/// Stops matched for one request.
#[derive(Debug, Clone)]
pub struct Candidates {
    /// Origin candidates, ordered by name, at most `max_candidates`.
    pub origins: Vec<Stop>,

    /// Destination candidates, ordered by name, at most `max_candidates`.
    pub destinations: Vec<Stop>,

    /// Every stop matching either text. This is the node set of the graph.
    pub matched: Vec<Stop>,
}

/// Trim and lower-case a query text.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Resolve origin and destination texts to candidate stops.
///
/// Both texts must already be [`normalize`]d and non-empty. They are
/// matched with a single store lookup, since the same stop may match both.
pub fn resolve_stops<S: TransitStore>(
    store: &S,
    origin: &str,
    destination: &str,
    max_candidates: usize,
) -> Result<Candidates, PlanError> {
    let matched = store
        .stops_matching(&[origin, destination])
        .map_err(|e| store_failure(Stage::Resolve, e))?;

    let mut origins: Vec<Stop> = matched
        .iter()
        .filter(|s| s.name_contains(origin))
        .cloned()
        .collect();
    let mut destinations: Vec<Stop> = matched
        .iter()
        .filter(|s| s.name_contains(destination))
        .cloned()
        .collect();

    if let Some(side) = Side::from_misses(origins.is_empty(), destinations.is_empty()) {
        return Err(PlanError::NoMatchingStops(side));
    }

    origins.truncate(max_candidates);
    destinations.truncate(max_candidates);

    Ok(Candidates {
        origins,
        destinations,
        matched,
    })
}

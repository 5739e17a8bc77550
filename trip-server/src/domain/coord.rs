//! Geographic coordinates.

use serde::{Deserialize, Serialize};

/// Error returned when a coordinate is out of range or not finite.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({lat}, {lon}): {reason}")]
pub struct InvalidCoord {
    lat: f64,
    lon: f64,
    reason: &'static str,
}

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    /// Create a coordinate without validation.
    ///
    /// Use [`Coord::parse`] for values coming from outside the process.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create a coordinate, checking it is finite and within range.
    pub fn parse(lat: f64, lon: f64) -> Result<Self, InvalidCoord> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoord {
                lat,
                lon,
                reason: "must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoord {
                lat,
                lon,
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoord {
                lat,
                lon,
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self { lat, lon })
    }
}

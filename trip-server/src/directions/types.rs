//! Directions API wire types and the walking-directions payload.
//!
//! The wire types mirror the subset of the Google Directions JSON response
//! that we read. Everything else in the response is ignored.

use serde::{Deserialize, Serialize};

use super::error::DirectionsError;

/// Top-level Directions API response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<ApiRoute>,
}

/// One alternative route.
#[derive(Debug, Deserialize)]
pub struct ApiRoute {
    #[serde(default)]
    pub legs: Vec<ApiLeg>,
    pub overview_polyline: EncodedPolyline,
}

/// One leg of a route (origin to destination when there are no waypoints).
#[derive(Debug, Deserialize)]
pub struct ApiLeg {
    pub distance: TextValue,
    pub duration: TextValue,
    #[serde(default)]
    pub steps: Vec<ApiStep>,
}

/// One turn-by-turn step.
#[derive(Debug, Deserialize)]
pub struct ApiStep {
    #[serde(default)]
    pub html_instructions: String,
    pub distance: TextValue,
    pub duration: TextValue,
    pub polyline: EncodedPolyline,
}

/// A human-readable quantity such as "1.2 km" or "14 mins".
#[derive(Debug, Deserialize)]
pub struct TextValue {
    pub text: String,
}

/// A polyline in the provider's encoded polyline format.
#[derive(Debug, Deserialize)]
pub struct EncodedPolyline {
    pub points: String,
}

/// Routed walking directions from the user's position to a stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkingDirections {
    pub distance: String,
    pub duration: String,
    pub steps: Vec<WalkingStep>,
    /// Encoded overview polyline.
    pub polyline: String,
}

/// One instruction of the walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkingStep {
    pub instruction: String,
    pub distance: String,
    pub duration: String,
    /// Encoded polyline of this step.
    pub polyline: String,
}

impl DirectionsResponse {
    /// Take the first leg of the first route.
    ///
    /// Any status other than `OK`, or an `OK` without routes, is reported as
    /// [`DirectionsError::NoRoute`].
    pub fn into_walking_directions(self) -> Result<WalkingDirections, DirectionsError> {
        if self.status != "OK" {
            return Err(DirectionsError::NoRoute(self.status));
        }

        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| DirectionsError::NoRoute("OK without routes".to_string()))?;

        let leg = route
            .legs
            .into_iter()
            .next()
            .ok_or_else(|| DirectionsError::NoRoute("OK without legs".to_string()))?;

        let steps = leg
            .steps
            .into_iter()
            .map(|step| WalkingStep {
                instruction: step.html_instructions,
                distance: step.distance.text,
                duration: step.duration.text,
                polyline: step.polyline.points,
            })
            .collect();

        Ok(WalkingDirections {
            distance: leg.distance.text,
            duration: leg.duration.text,
            steps,
            polyline: route.overview_polyline.points,
        })
    }
}

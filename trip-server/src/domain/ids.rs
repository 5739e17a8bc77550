//! Identifier types for feed entities.
//!
//! Feed identifiers are opaque strings. The only thing we insist on is that
//! they are non-empty once surrounding whitespace is removed, so an `Id`
//! value can always be used as a map key and printed meaningfully.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an empty identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: must not be empty")]
pub struct InvalidId {
    kind: &'static str,
}

macro_rules! feed_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse an identifier, trimming surrounding whitespace.
            pub fn parse(s: &str) -> Result<Self, InvalidId> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(InvalidId { kind: $kind });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

feed_id!(
    /// Identifier of a stop (boarding/alighting location).
    StopId,
    "stop id"
);

feed_id!(
    /// Identifier of one scheduled run of a vehicle.
    TripId,
    "trip id"
);

feed_id!(
    /// Identifier of a geometry shape followed by trips.
    ShapeId,
    "shape id"
);

feed_id!(
    /// Identifier of a route (a named line grouping trips).
    RouteId,
    "route id"
);

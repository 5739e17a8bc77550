//! Transit trip planner server.
//!
//! A web service that answers: "how do I get from a stop named like this
//! to a stop named like that?" using a GTFS feed and, optionally, walking
//! directions to the first stop.

pub mod directions;
pub mod domain;
pub mod geo;
pub mod planner;
pub mod store;
pub mod web;

//! Cutting a trip's shape down to the part between two stops.

use crate::domain::Coord;
use crate::geo::nearest_index;

/// Inclusive index range of `shape` between the points nearest to `a` and
/// `b`, lower bound first. `None` for an empty shape.
///
/// The two nearest points are found independently, so for a shape that
/// doubles back the range may not follow travel direction.
pub fn slice_bounds(shape: &[Coord], a: Coord, b: Coord) -> Option<(usize, usize)> {
    let i = nearest_index(shape, a)?;
    let j = nearest_index(shape, b)?;
    Some((i.min(j), i.max(j)))
}

/// The part of `shape` between the points nearest to `a` and `b`.
pub fn project(shape: &[Coord], a: Coord, b: Coord) -> Vec<Coord> {
    match slice_bounds(shape, a, b) {
        Some((lo, hi)) => shape[lo..=hi].to_vec(),
        None => Vec::new(),
    }
}

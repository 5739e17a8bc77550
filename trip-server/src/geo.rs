//! Great-circle distance and nearest-point search.

use crate::domain::Coord;

/// Earth radius used for all distance computations, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometres.
pub fn distance_km(a: Coord, b: Coord) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Index of the point closest to `target`.
///
/// Ties resolve to the lowest index. Returns `None` for an empty slice.
pub fn nearest_index(points: &[Coord], target: Coord) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        let d = distance_km(*p, target);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Sum of distances between consecutive points, in kilometres.
pub fn polyline_length_km(points: &[Coord]) -> f64 {
    points
        .windows(2)
        .map(|w| distance_km(w[0], w[1]))
        .sum()
}

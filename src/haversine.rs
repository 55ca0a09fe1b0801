//! Great-circle distances in miles.
//!
//! Distances along the route are straight-line between consecutive path
//! points, which is accurate enough for placing stops on a densely sampled
//! road geometry.

use crate::model::LatLng;

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine distance between two points in miles.
pub fn haversine_miles(from: LatLng, to: LatLng) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Sum of segment distances along `points`.
pub fn path_length_miles(points: &[LatLng]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_miles(pair[0], pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let dist = haversine_miles((36.1, -115.1), (36.1, -115.1));
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Los Angeles to Phoenix, roughly 357 miles as the crow flies
        let dist = haversine_miles((34.0522, -118.2437), (33.4484, -112.0740));
        assert!(dist > 345.0 && dist < 370.0, "LA to PHX should be ~357mi, got {}", dist);
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = (34.0522, -118.2437);
        let b = (32.7767, -96.7970);
        assert_eq!(haversine_miles(a, b), haversine_miles(b, a));
    }

    #[test]
    fn test_path_length_matches_segments() {
        let points = [(34.05, -118.24), (33.45, -112.07), (32.78, -96.80)];
        let expected = haversine_miles(points[0], points[1]) + haversine_miles(points[1], points[2]);
        assert!((path_length_miles(&points) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_path_length_degenerate() {
        assert_eq!(path_length_miles(&[]), 0.0);
        assert_eq!(path_length_miles(&[(1.0, 2.0)]), 0.0);
    }
}

//! Route geometry as a decoded coordinate sequence.
//!
//! Stops arrive with only a mile marker; [`Polyline::point_at_mile`] turns
//! that into a coordinate by walking the cumulative distance table.

use serde::{Deserialize, Serialize};

use crate::haversine::haversine_miles;
use crate::model::LatLng;

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<LatLng>,
}

/// Axis-aligned lat/lng bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Polyline {
    /// Creates a new Polyline from (latitude, longitude) points.
    pub fn new(points: Vec<LatLng>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn into_points(self) -> Vec<LatLng> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<LatLng> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<LatLng> {
        self.points.last().copied()
    }

    /// The point at index `len / 2`.
    pub fn middle(&self) -> Option<LatLng> {
        self.points.get(self.points.len() / 2).copied()
    }

    /// Running distance in miles at each index; the first entry is 0.
    ///
    /// Empty for an empty polyline.
    pub fn cumulative_miles(&self) -> Vec<f64> {
        let mut cumulative = Vec::with_capacity(self.points.len());
        let mut total = 0.0;
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                total += haversine_miles(self.points[i - 1], *point);
            }
            cumulative.push(total);
        }
        cumulative
    }

    pub fn total_miles(&self) -> f64 {
        self.cumulative_miles().last().copied().unwrap_or(0.0)
    }

    /// Coordinate `mile` miles along the path.
    ///
    /// Miles at or below zero give the first point, miles beyond the end
    /// give the last point. Inside the path the position is interpolated
    /// linearly in lat/lng within the first segment whose cumulative
    /// distance reaches `mile`.
    pub fn point_at_mile(&self, mile: f64) -> Option<LatLng> {
        PathLocator::new(self).point_at_mile(mile)
    }

    pub fn bounds(&self) -> Option<LatLngBounds> {
        let (first, rest) = self.points.split_first()?;
        let mut bounds = LatLngBounds {
            south_west: *first,
            north_east: *first,
        };
        for &(lat, lng) in rest {
            bounds.south_west.0 = bounds.south_west.0.min(lat);
            bounds.south_west.1 = bounds.south_west.1.min(lng);
            bounds.north_east.0 = bounds.north_east.0.max(lat);
            bounds.north_east.1 = bounds.north_east.1.max(lng);
        }
        Some(bounds)
    }
}

/// Precomputed cumulative distances for repeated mile lookups on one path.
#[derive(Debug, Clone)]
pub struct PathLocator<'a> {
    points: &'a [LatLng],
    cumulative: Vec<f64>,
}

impl<'a> PathLocator<'a> {
    pub fn new(polyline: &'a Polyline) -> Self {
        Self {
            points: polyline.points(),
            cumulative: polyline.cumulative_miles(),
        }
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn point_at_mile(&self, mile: f64) -> Option<LatLng> {
        let first = *self.points.first()?;
        if mile <= 0.0 {
            return Some(first);
        }

        for i in 1..self.cumulative.len() {
            if self.cumulative[i] >= mile {
                let prev = self.cumulative[i - 1];
                let mut span = self.cumulative[i] - prev;
                if span == 0.0 {
                    span = 1.0;
                }
                let ratio = (mile - prev) / span;
                let (lat0, lng0) = self.points[i - 1];
                let (lat1, lng1) = self.points[i];
                return Some((lat0 + ratio * (lat1 - lat0), lng0 + ratio * (lng1 - lng0)));
            }
        }

        self.points.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haversine::path_length_miles;

    fn route() -> Polyline {
        Polyline::new(vec![
            (34.0522, -118.2437),
            (34.0522, -118.2437),
            (33.4484, -112.0740),
            (32.7767, -96.7970),
        ])
    }

    #[test]
    fn test_new_and_points() {
        let points = vec![(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
        let polyline = Polyline::new(points.clone());
        assert_eq!(polyline.points(), &points[..]);
        assert_eq!(polyline.into_points(), points);
    }

    #[test]
    fn test_cumulative_non_decreasing_and_ends_at_total() {
        let polyline = route();
        let cumulative = polyline.cumulative_miles();
        assert_eq!(cumulative.len(), 4);
        assert_eq!(cumulative[0], 0.0);
        assert!(cumulative.windows(2).all(|w| w[1] >= w[0]));
        let total = path_length_miles(polyline.points());
        assert!((cumulative[3] - total).abs() < 1e-9);
        assert!((polyline.total_miles() - total).abs() < 1e-9);
    }

    #[test]
    fn test_point_at_mile_zero_is_first() {
        let polyline = route();
        assert_eq!(polyline.point_at_mile(0.0), polyline.first());
        assert_eq!(polyline.point_at_mile(-5.0), polyline.first());
    }

    #[test]
    fn test_point_beyond_end_is_last() {
        let polyline = route();
        let total = polyline.total_miles();
        assert_eq!(polyline.point_at_mile(total + 1.0), polyline.last());
        assert_eq!(polyline.point_at_mile(1.0e6), polyline.last());
    }

    #[test]
    fn test_point_at_exact_total_is_last() {
        let polyline = route();
        let total = polyline.total_miles();
        let (lat, lng) = polyline.point_at_mile(total).unwrap();
        let (last_lat, last_lng) = polyline.last().unwrap();
        assert!((lat - last_lat).abs() < 1e-9);
        assert!((lng - last_lng).abs() < 1e-9);
    }

    #[test]
    fn test_interpolates_halfway_along_segment() {
        let polyline = Polyline::new(vec![(0.0, 0.0), (0.0, 2.0)]);
        let half = polyline.total_miles() / 2.0;
        let (lat, lng) = polyline.point_at_mile(half).unwrap();
        assert!(lat.abs() < 1e-9);
        assert!((lng - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_length_segment_does_not_divide_by_zero() {
        let polyline = Polyline::new(vec![(10.0, 10.0), (10.0, 10.0)]);
        // mile is positive but the path has no length: falls off the end
        assert_eq!(polyline.point_at_mile(0.5), Some((10.0, 10.0)));

        let locator = PathLocator::new(&polyline);
        assert_eq!(locator.cumulative(), &[0.0, 0.0]);
    }

    #[test]
    fn test_empty_polyline() {
        let polyline = Polyline::new(vec![]);
        assert!(polyline.is_empty());
        assert!(polyline.cumulative_miles().is_empty());
        assert_eq!(polyline.point_at_mile(10.0), None);
        assert_eq!(polyline.bounds(), None);
        assert_eq!(polyline.middle(), None);
    }

    #[test]
    fn test_middle_uses_floor_index() {
        let polyline = Polyline::new(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert_eq!(polyline.middle(), Some((2.0, 2.0)));
    }

    #[test]
    fn test_bounds() {
        let bounds = route().bounds().unwrap();
        assert_eq!(bounds.south_west, (32.7767, -118.2437));
        assert_eq!(bounds.north_east, (34.0522, -96.7970));
    }
}

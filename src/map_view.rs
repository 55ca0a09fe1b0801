//! Route map scene: the route line, fixed trip markers, and stops placed
//! along the path by mile marker, plus a viewport fitted to the route.
//!
//! The scene is widget-agnostic. [`MapScene::to_geojson`] hands it to any
//! slippy-map front end; the tile layer settings travel alongside.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::config::MapConfig;
use crate::model::{DutyStatus, LatLng, RouteInfo, Stop};
use crate::polyline::{LatLngBounds, PathLocator, Polyline};

/// Web-Mercator tile size in pixels.
const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web-Mercator projection.
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Start,
    Pickup,
    Dropoff,
    Fuel,
    SleeperRest,
    OffDutyRest,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub fill_color: &'static str,
    pub radius: f64,
}

impl MarkerKind {
    pub fn style(self) -> MarkerStyle {
        let (color, fill_color, radius) = match self {
            MarkerKind::Start => ("#111827", "#0ea5e9", 7.0),
            MarkerKind::Pickup => ("#ebf800", "#c1cb31", 7.0),
            MarkerKind::Dropoff => ("#7c2d12", "#ff0808", 7.0),
            MarkerKind::Fuel => ("#92400e", "#f97316", 6.0),
            MarkerKind::SleeperRest => ("#065f46", "#10B981", 6.0),
            MarkerKind::OffDutyRest => ("#4b5563", "#9CA3AF", 6.0),
        };
        MarkerStyle {
            color,
            fill_color,
            radius,
        }
    }

    pub fn is_fixed(self) -> bool {
        matches!(self, MarkerKind::Start | MarkerKind::Pickup | MarkerKind::Dropoff)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: LatLng,
    pub popup: String,
}

/// Map center and integer zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

/// Everything needed to draw the route map.
#[derive(Debug, Clone)]
pub struct MapScene {
    pub route: Polyline,
    pub markers: Vec<Marker>,
    pub viewport: Viewport,
    pub total_distance_miles: f64,
    pub tile_url: String,
    pub attribution: String,
    /// Map size in CSS pixels; the viewport was fitted for this size.
    pub width: f64,
    pub height: f64,
}

impl MapScene {
    /// Builds the scene for a route. Returns `None` when the path is empty,
    /// in which case no map is shown at all.
    pub fn build(route_info: &RouteInfo, config: &MapConfig) -> Option<Self> {
        let route = Polyline::new(route_info.path.clone());
        let bounds = route.bounds()?;
        let locator = PathLocator::new(&route);

        let mut markers = fixed_markers(&route, &route_info.waypoints);
        markers.extend(route_info.fuel_stops.iter().map(|stop| Marker {
            kind: MarkerKind::Fuel,
            position: stop_position(&locator, stop),
            popup: format!("Fuel stop at mile {}", fmt_opt(stop.mile_marker)),
        }));
        markers.extend(route_info.rest_stops.iter().map(|stop| Marker {
            kind: rest_kind(stop),
            position: stop_position(&locator, stop),
            popup: format!(
                "{} (day {}) - {} hr - mile {}",
                stop.kind.as_deref().unwrap_or("REST"),
                stop.day.map_or_else(|| "?".to_string(), |day| day.to_string()),
                fmt_opt(stop.duration),
                fmt_opt(stop.mile_marker)
            ),
        }));

        let viewport = fit_bounds(&bounds, config);
        debug!(
            points = route.points().len(),
            markers = markers.len(),
            zoom = viewport.zoom,
            "built map scene"
        );

        Some(Self {
            route,
            markers,
            viewport,
            total_distance_miles: route_info.total_distance_miles,
            tile_url: config.tile_url.clone(),
            attribution: config.attribution.clone(),
            width: config.viewport_width,
            height: config.viewport_height,
        })
    }

    pub fn markers_of(&self, kind: MarkerKind) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |marker| marker.kind == kind)
    }

    /// Exports the route line and markers as a GeoJSON FeatureCollection.
    ///
    /// Coordinates are `[lng, lat]` per GeoJSON; styling goes in `properties`.
    pub fn to_geojson(&self) -> Value {
        let line: Vec<[f64; 2]> = self
            .route
            .points()
            .iter()
            .map(|&(lat, lng)| [lng, lat])
            .collect();

        let mut features = vec![json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": line },
            "properties": {
                "kind": "route",
                "color": "#2563EB",
                "weight": 6,
                "opacity": 0.95,
                "total_distance_miles": self.total_distance_miles,
            },
        })];

        features.extend(self.markers.iter().map(|marker| {
            let (lat, lng) = marker.position;
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [lng, lat] },
                "properties": {
                    "kind": marker.kind,
                    "popup": marker.popup,
                    "style": marker.kind.style(),
                },
            })
        }));

        json!({
            "type": "FeatureCollection",
            "features": features,
            "viewport": {
                "center": [self.viewport.center.0, self.viewport.center.1],
                "zoom": self.viewport.zoom,
            },
        })
    }
}

/// Drops coordinates equal to six decimal places, keeping the first
/// occurrence in order. Signed zeros compare equal.
pub fn dedupe_waypoints(waypoints: &[LatLng]) -> Vec<LatLng> {
    let mut seen = HashSet::new();
    waypoints
        .iter()
        .filter(|&&(lat, lng)| seen.insert((micro_degrees(lat), micro_degrees(lng))))
        .copied()
        .collect()
}

fn micro_degrees(value: f64) -> i64 {
    // `as` saturates and maps -0.0 to 0
    (value * 1e6).round() as i64
}

/// Start, pickup and dropoff markers. Missing waypoints fall back to the
/// path's first, middle and last points.
fn fixed_markers(route: &Polyline, waypoints: &[LatLng]) -> Vec<Marker> {
    let (Some(first), Some(middle), Some(last)) = (route.first(), route.middle(), route.last())
    else {
        return Vec::new();
    };

    let unique = if waypoints.is_empty() {
        dedupe_waypoints(&[first, middle, last])
    } else {
        dedupe_waypoints(waypoints)
    };

    [
        (MarkerKind::Start, "Current (Start)", first),
        (MarkerKind::Pickup, "Pickup", middle),
        (MarkerKind::Dropoff, "Dropoff", last),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (kind, popup, fallback))| Marker {
        kind,
        position: unique.get(i).copied().unwrap_or(fallback),
        popup: popup.to_string(),
    })
    .collect()
}

fn stop_position(locator: &PathLocator<'_>, stop: &Stop) -> LatLng {
    let mile = stop.mile_marker.unwrap_or(0.0);
    // the locator only fails on an empty path, which never builds a scene
    locator.point_at_mile(mile).unwrap_or_default()
}

fn rest_kind(stop: &Stop) -> MarkerKind {
    match stop.status() {
        Some(DutyStatus::SleeperBerth) => MarkerKind::SleeperRest,
        _ => MarkerKind::OffDutyRest,
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "?".to_string(), |value| value.to_string())
}

/// Projects a coordinate to Web-Mercator pixels at zoom 0.
fn project((lat, lng): LatLng) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (lng + 180.0) / 360.0 * TILE_SIZE;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * TILE_SIZE;
    (x, y)
}

fn unproject((x, y): (f64, f64)) -> LatLng {
    let lng = x / TILE_SIZE * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * y / TILE_SIZE);
    let lat = n.sinh().atan().to_degrees();
    (lat, lng)
}

/// Largest integer zoom at which `bounds` fits inside the viewport minus
/// `padding` on every side, centered on the bounds.
pub fn fit_bounds(bounds: &LatLngBounds, config: &MapConfig) -> Viewport {
    let (x0, y0) = project((bounds.north_east.0, bounds.south_west.1));
    let (x1, y1) = project((bounds.south_west.0, bounds.north_east.1));
    let center = unproject(((x0 + x1) / 2.0, (y0 + y1) / 2.0));

    let span_x = x1 - x0;
    let span_y = y1 - y0;
    let available_x = config.viewport_width - 2.0 * config.padding;
    let available_y = config.viewport_height - 2.0 * config.padding;

    let zoom = if available_x <= 0.0 || available_y <= 0.0 {
        0
    } else if span_x <= 0.0 && span_y <= 0.0 {
        config.max_zoom
    } else {
        let scale_x = if span_x > 0.0 { available_x / span_x } else { f64::INFINITY };
        let scale_y = if span_y > 0.0 { available_y / span_y } else { f64::INFINITY };
        let zoom = scale_x.min(scale_y).log2().floor();
        zoom.clamp(0.0, f64::from(config.max_zoom)) as u8
    };

    Viewport { center, zoom }
}

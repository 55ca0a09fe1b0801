//! Client-side configuration for the trip API and the map widget.

/// Settings for the remote trip-planning API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL; the create endpoint is appended as `/trips/create/`.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            timeout_secs: 15,
        }
    }
}

impl ApiConfig {
    pub fn create_trip_url(&self) -> String {
        format!("{}/trips/create/", self.base_url.trim_end_matches('/'))
    }
}

/// Map viewport and tile layer settings.
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Padding in pixels kept on every side when fitting the route.
    pub padding: f64,
    pub tile_url: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            viewport_width: 960.0,
            viewport_height: 420.0,
            padding: 40.0,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap".to_string(),
            max_zoom: 18,
        }
    }
}

//! Static HTML rendering of the page view.
//!
//! The map section hands the scene's GeoJSON to a Leaflet widget; the
//! duty-log panels are inlined SVG. Layout lives in `templates/report.html`.

use askama::Template;
use serde_json::Value;

use crate::config::MapConfig;
use crate::controller::{PageView, RenderedPanel};
use crate::error::TripError;
use crate::map_view::MapScene;
use crate::model::TripForm;

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    form: &'a TripForm,
    cycle_used: String,
    loading: bool,
    map: Option<MapSection>,
    panels: &'a [RenderedPanel],
    page_width: f64,
}

/// Script-ready pieces of the map widget.
struct MapSection {
    scene_json: String,
    tile_url_json: String,
    attribution_json: String,
    width: f64,
    height: f64,
}

impl MapSection {
    fn new(scene: &MapScene) -> Self {
        Self {
            scene_json: script_json(&scene.to_geojson()),
            tile_url_json: script_json(&Value::from(scene.tile_url.as_str())),
            attribution_json: script_json(&Value::from(scene.attribution.as_str())),
            width: scene.width,
            height: scene.height,
        }
    }
}

/// JSON literal safe to embed in an inline `<script>`.
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Renders the page for `form` and `view` as a complete HTML document.
///
/// The page is as wide as the map it shows, so the fitted viewport is the
/// one the reader sees.
pub fn to_html(form: &TripForm, view: &PageView) -> Result<String, TripError> {
    let map = view.map().map(MapSection::new);
    let page_width = map
        .as_ref()
        .map_or_else(|| MapConfig::default().viewport_width, |map| map.width);

    let template = ReportTemplate {
        form,
        cycle_used: form.cycle_hours_text(),
        loading: matches!(view, PageView::Loading),
        map,
        panels: view.panels(),
        page_width,
    };
    Ok(template.render()?)
}

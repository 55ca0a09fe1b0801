//! Hour-of-day to pixel mapping for the 24-hour duty chart.
//!
//! The scale is fixed and linear. Nothing here clamps: hours outside
//! `[0, 24]` simply land outside the chart's viewport.

/// Chart width in SVG user units.
pub const CHART_WIDTH: f64 = 960.0;

/// Chart height in SVG user units.
pub const CHART_HEIGHT: f64 = 220.0;

/// Hours covered by one chart.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Narrowest bar drawn for an activity, so instantaneous events stay visible.
pub const MIN_BAR_WIDTH: f64 = 0.5;

/// Linear hour-to-pixel scale for a chart of a given width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineScale {
    width: f64,
}

impl Default for TimelineScale {
    fn default() -> Self {
        Self::new(CHART_WIDTH)
    }
}

impl TimelineScale {
    pub fn new(width: f64) -> Self {
        Self { width }
    }

    /// Pixels per hour.
    pub fn px_per_hour(&self) -> f64 {
        self.width / HOURS_PER_DAY
    }

    pub fn x_from_hour(&self, hour: f64) -> f64 {
        hour * self.px_per_hour()
    }

    pub fn width_from_duration(&self, hours: f64) -> f64 {
        hours * self.px_per_hour()
    }

    /// Width of the bar for an interval, floored at [`MIN_BAR_WIDTH`].
    pub fn bar_width(&self, start: f64, end: f64) -> f64 {
        self.width_from_duration(end - start).max(MIN_BAR_WIDTH)
    }
}

/// Label printed above hour gridline `hour`.
pub fn hour_label(hour: u32) -> String {
    match hour {
        0 => "Midnight".to_string(),
        12 => "Noon".to_string(),
        other => other.to_string(),
    }
}

/// Rounds to two decimals, the precision used for daily hour sums.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//! Daily duty-status log rendered as a 24-hour SVG timeline.
//!
//! Each recognized duty status owns a fixed horizontal lane. Activities are
//! drawn as bars spanning `start..end` in their lane; per-status totals are
//! summed from `duration` and shown in the legend, with a warning when the
//! day does not add up to 24 hours.

use std::fmt::Write as _;

use tracing::warn;

use crate::markup::{escape, num};
use crate::model::{Activity, DayLog, DutyStatus};
use crate::timeline::{CHART_HEIGHT, CHART_WIDTH, HOURS_PER_DAY, TimelineScale, hour_label, round2};

/// Height of the header band drawn above the chart.
const HEADER_HEIGHT: f64 = 56.0;

/// Height of the legend band drawn below the chart.
const LEGEND_HEIGHT: f64 = 28.0;

/// Bars narrower than this carry no text label.
const LABEL_MIN_WIDTH: f64 = 36.0;

const BAR_HEIGHT: f64 = 20.0;
const LANE_HEIGHT: f64 = 36.0;
const UNKNOWN_COLOR: &str = "#888";
const FUEL_MARKER_COLOR: &str = "#f97316";
const WARNING_COLOR: &str = "red";

/// One horizontal row of the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lane {
    pub status: DutyStatus,
    pub label: &'static str,
    /// Vertical center of the lane in chart coordinates.
    pub y: f64,
}

pub const LANES: [Lane; 4] = [
    Lane { status: DutyStatus::OffDuty, label: "Off Duty", y: 40.0 },
    Lane { status: DutyStatus::SleeperBerth, label: "Sleeper Berth", y: 80.0 },
    Lane { status: DutyStatus::Driving, label: "Driving", y: 120.0 },
    Lane { status: DutyStatus::OnDuty, label: "On Duty (Not Driving)", y: 160.0 },
];

/// Lane for a status; unrecognized activities fall into the first lane.
pub fn lane_for(status: Option<DutyStatus>) -> &'static Lane {
    status
        .and_then(|status| LANES.iter().find(|lane| lane.status == status))
        .unwrap_or(&LANES[0])
}

pub fn color_for(status: Option<DutyStatus>) -> &'static str {
    match status {
        Some(DutyStatus::OffDuty) => "#424243",
        Some(DutyStatus::SleeperBerth) => "#10B981",
        Some(DutyStatus::Driving) => "#2563EB",
        Some(DutyStatus::OnDuty) => "#F59E0B",
        None => UNKNOWN_COLOR,
    }
}

/// Hours per duty status for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DutyTotals {
    pub off_duty: f64,
    pub sleeper_berth: f64,
    pub driving: f64,
    pub on_duty: f64,
}

impl DutyTotals {
    /// Sums `duration` by status. Entries without a recognized status or a
    /// numeric duration are skipped.
    pub fn from_activities(activities: &[Activity]) -> Self {
        let mut totals = Self::default();
        let mut skipped = 0usize;
        for activity in activities {
            match (activity.status(), activity.duration) {
                (Some(status), Some(duration)) => *totals.slot_mut(status) += duration,
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!(skipped, "skipped activities without status or duration");
        }
        totals
    }

    pub fn get(&self, status: DutyStatus) -> f64 {
        match status {
            DutyStatus::OffDuty => self.off_duty,
            DutyStatus::SleeperBerth => self.sleeper_berth,
            DutyStatus::Driving => self.driving,
            DutyStatus::OnDuty => self.on_duty,
        }
    }

    fn slot_mut(&mut self, status: DutyStatus) -> &mut f64 {
        match status {
            DutyStatus::OffDuty => &mut self.off_duty,
            DutyStatus::SleeperBerth => &mut self.sleeper_berth,
            DutyStatus::Driving => &mut self.driving,
            DutyStatus::OnDuty => &mut self.on_duty,
        }
    }

    pub fn sum(&self) -> f64 {
        self.driving + self.on_duty + self.off_duty + self.sleeper_berth
    }

    /// Sum rounded to two decimals.
    pub fn day_sum(&self) -> f64 {
        round2(self.sum())
    }

    /// True when the rounded day sum is not exactly 24 hours.
    pub fn has_warning(&self) -> bool {
        self.day_sum() != HOURS_PER_DAY
    }
}

/// Geometry of one activity bar in chart coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityBar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub color: &'static str,
    pub label: Option<String>,
    /// Center of the fuel-stop marker, when the activity is a fuel stop.
    pub fuel_marker: Option<(f64, f64)>,
}

impl ActivityBar {
    pub fn layout(activity: &Activity, scale: &TimelineScale) -> Self {
        let status = activity.status();
        let start = activity.start.unwrap_or(0.0);
        let end = activity
            .end
            .unwrap_or_else(|| start + activity.duration.unwrap_or(0.0));
        let width = scale.bar_width(start, end);
        let y = lane_for(status).y - BAR_HEIGHT / 2.0;

        let label = if width > LABEL_MIN_WIDTH {
            match (status, activity.reason.as_deref()) {
                (Some(DutyStatus::OnDuty), Some(reason)) if !reason.is_empty() => {
                    Some(reason.to_string())
                }
                _ => activity.kind.clone(),
            }
        } else {
            None
        };

        let fuel_marker = activity
            .is_fuel_stop()
            .then(|| (scale.x_from_hour((start + end) / 2.0), y - 6.0));

        Self {
            x: scale.x_from_hour(start),
            y,
            width,
            color: color_for(status),
            label,
            fuel_marker,
        }
    }
}

/// A day's log panel: header, timeline chart and totals legend.
#[derive(Debug, Clone)]
pub struct DayLogPanel<'a> {
    log: &'a DayLog,
    totals: DutyTotals,
    scale: TimelineScale,
}

impl<'a> DayLogPanel<'a> {
    pub fn new(log: &'a DayLog) -> Self {
        Self {
            log,
            totals: DutyTotals::from_activities(&log.activities),
            scale: TimelineScale::new(CHART_WIDTH),
        }
    }

    pub fn has_warning(&self) -> bool {
        self.totals.has_warning()
    }

    pub fn bars(&self) -> Vec<ActivityBar> {
        self.log
            .activities
            .iter()
            .map(|activity| ActivityBar::layout(activity, &self.scale))
            .collect()
    }

    pub fn panel_height() -> f64 {
        HEADER_HEIGHT + CHART_HEIGHT + LEGEND_HEIGHT
    }

    /// Renders the whole panel as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let width = CHART_WIDTH;
        let height = Self::panel_height();
        let mut out = String::new();
        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100%\" viewBox=\"0 0 {} {}\" preserveAspectRatio=\"xMidYMid meet\" font-family=\"sans-serif\">",
            num(width),
            num(height)
        );
        let _ = write!(
            out,
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"#ffffff\"/>",
            num(width),
            num(height)
        );
        self.write_header(&mut out);
        let _ = write!(out, "<g transform=\"translate(0,{})\">", num(HEADER_HEIGHT));
        self.write_chart(&mut out);
        out.push_str("</g>");
        self.write_legend(&mut out);
        out.push_str("</svg>");
        out
    }

    fn write_header(&self, out: &mut String) {
        let log = self.log;
        let _ = write!(
            out,
            "<text x=\"8\" y=\"18\" font-size=\"15\" font-weight=\"bold\" fill=\"#111\">Day {}: {}</text>",
            log.day,
            escape(&log.date)
        );
        let _ = write!(
            out,
            "<text x=\"8\" y=\"38\" font-size=\"12\" fill=\"#4b5563\">From: {}  To: {}</text>",
            escape(&log.from),
            escape(&log.to)
        );

        let right = num(CHART_WIDTH - 8.0);
        let _ = write!(
            out,
            "<text x=\"{right}\" y=\"14\" font-size=\"12\" text-anchor=\"end\" fill=\"#111\">Total miles today: {}</text>",
            log.total_miles_driving_today
        );
        let _ = write!(
            out,
            "<text x=\"{right}\" y=\"30\" font-size=\"12\" text-anchor=\"end\" fill=\"#111\">Total hours: {}</text>",
            log.total_hours
        );

        let day_sum = self.totals.day_sum();
        if self.has_warning() {
            let _ = write!(
                out,
                "<text class=\"day-sum-warning\" x=\"{right}\" y=\"46\" font-size=\"12\" text-anchor=\"end\" fill=\"{WARNING_COLOR}\">Day sum: {day_sum} h (should be 24)</text>"
            );
        } else {
            let _ = write!(
                out,
                "<text class=\"day-sum\" x=\"{right}\" y=\"46\" font-size=\"12\" text-anchor=\"end\" fill=\"#111\">Day sum: {day_sum} h</text>"
            );
        }
    }

    fn write_chart(&self, out: &mut String) {
        let scale = &self.scale;
        let width = num(CHART_WIDTH);

        // quarter-hour ticks, full hours emphasized
        out.push_str("<g>");
        for i in 0..96u32 {
            let x = num(scale.x_from_hour(f64::from(i) / 4.0));
            let (stroke, stroke_width) = if i % 4 == 0 {
                ("#cbd5e1", "0.9")
            } else {
                ("#eef2f7", "0.35")
            };
            let _ = write!(
                out,
                "<line x1=\"{x}\" y1=\"28\" x2=\"{x}\" y2=\"{}\" stroke=\"{stroke}\" stroke-width=\"{stroke_width}\"/>",
                num(CHART_HEIGHT - 48.0)
            );
        }
        out.push_str("</g>");

        out.push_str("<g>");
        for hour in 0..=24u32 {
            let x = num(scale.x_from_hour(f64::from(hour)));
            let _ = write!(
                out,
                "<line x1=\"{x}\" y1=\"24\" x2=\"{x}\" y2=\"{}\" stroke=\"#d1d5db\" stroke-width=\"1\"/>",
                num(CHART_HEIGHT - 44.0)
            );
        }
        out.push_str("</g>");

        for lane in &LANES {
            let _ = write!(
                out,
                "<g><rect x=\"0\" y=\"{}\" width=\"{width}\" height=\"{}\" fill=\"#ffffff\" fill-opacity=\"0\" stroke=\"#ccc\" stroke-width=\"0.6\"/><text x=\"8\" y=\"{}\" font-size=\"12\" fill=\"#111\">{}</text></g>",
                num(lane.y - LANE_HEIGHT / 2.0),
                num(LANE_HEIGHT),
                num(lane.y),
                lane.label
            );
        }

        // labels go after the grid so nothing covers them
        out.push_str("<g>");
        for hour in 0..=24u32 {
            let x = scale.x_from_hour(f64::from(hour));
            let _ = write!(
                out,
                "<g><rect x=\"{}\" y=\"2\" width=\"50\" height=\"14\" fill=\"#f8d1d1\" opacity=\"0.95\"/><text x=\"{}\" y=\"13\" font-size=\"10\" fill=\"#111\">{}</text></g>",
                num(x - 2.0),
                num(x - 1.0),
                hour_label(hour)
            );
        }
        out.push_str("</g>");

        out.push_str("<g>");
        for bar in self.bars() {
            let _ = write!(
                out,
                "<g><rect class=\"activity\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" opacity=\"0.95\" stroke=\"#222\" stroke-width=\"0.25\" rx=\"2\"/>",
                num(bar.x),
                num(bar.y),
                num(bar.width),
                num(BAR_HEIGHT),
                bar.color
            );
            if let Some(label) = &bar.label {
                let _ = write!(
                    out,
                    "<text x=\"{}\" y=\"{}\" font-size=\"10\" fill=\"#fff\">{}</text>",
                    num(bar.x + 6.0),
                    num(bar.y + 14.0),
                    escape(label)
                );
            }
            if let Some((cx, cy)) = bar.fuel_marker {
                let _ = write!(
                    out,
                    "<circle class=\"fuel-stop\" cx=\"{}\" cy=\"{}\" r=\"4\" fill=\"{FUEL_MARKER_COLOR}\" stroke=\"#333\"/>",
                    num(cx),
                    num(cy)
                );
            }
            out.push_str("</g>");
        }
        out.push_str("</g>");

        let _ = write!(
            out,
            "<g><rect x=\"0\" y=\"{}\" width=\"{width}\" height=\"36\" fill=\"#fff\" stroke=\"#111\" stroke-width=\"0.6\"/><text x=\"8\" y=\"{}\" font-size=\"12\" fill=\"#111\">REMARKS: </text></g>",
            num(CHART_HEIGHT - 36.0),
            num(CHART_HEIGHT - 16.0)
        );
    }

    fn write_legend(&self, out: &mut String) {
        let y = HEADER_HEIGHT + CHART_HEIGHT + 18.0;
        let entries = [
            (DutyStatus::Driving, "Driving"),
            (DutyStatus::OnDuty, "On Duty"),
            (DutyStatus::SleeperBerth, "Sleeper Berth"),
            (DutyStatus::OffDuty, "Off Duty"),
        ];
        for (i, (status, label)) in entries.into_iter().enumerate() {
            let x = 8.0 + 200.0 * i as f64;
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"12\" height=\"12\" fill=\"{}\"/><text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"#111\">{}: {:.2} h</text>",
                num(x),
                num(y - 10.0),
                color_for(Some(status)),
                num(x + 18.0),
                num(y),
                label,
                self.totals.get(status)
            );
        }
    }
}

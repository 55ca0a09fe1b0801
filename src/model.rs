//! Request and response shapes exchanged with the trip-planning API.
//!
//! Response decoding is deliberately forgiving: every field defaults when
//! absent, per-activity fields of the wrong JSON type decode as `None`, and
//! activity entries that are not objects are dropped, so aggregation can
//! skip them instead of failing the whole payload.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Reason tag the backend attaches to on-duty fuel stops.
pub const FUEL_STOP_REASON: &str = "Fuel stop";

/// A (latitude, longitude) pair in degrees.
pub type LatLng = (f64, f64);

/// Trip parameters posted to the API. All fields are freeform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripForm {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    /// Sent as typed: a JSON number when the input parses as one, the raw
    /// text otherwise. The server decides what is acceptable.
    pub current_cycle_used_hours: Value,
}

impl Default for TripForm {
    fn default() -> Self {
        Self {
            current_location: String::new(),
            pickup_location: String::new(),
            dropoff_location: String::new(),
            current_cycle_used_hours: Value::from(0),
        }
    }
}

impl TripForm {
    /// Converts raw cycle-hours input into the value sent on the wire.
    pub fn cycle_hours_value(raw: &str) -> Value {
        raw.trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(raw.to_string()))
    }

    /// Cycle hours as entered, for display.
    pub fn cycle_hours_text(&self) -> String {
        match &self.current_cycle_used_hours {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// Hours-of-service duty status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DutyStatus {
    OffDuty,
    SleeperBerth,
    Driving,
    OnDuty,
}

impl DutyStatus {
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::SleeperBerth,
        DutyStatus::Driving,
        DutyStatus::OnDuty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "OFF_DUTY",
            DutyStatus::SleeperBerth => "SLEEPER_BERTH",
            DutyStatus::Driving => "DRIVING",
            DutyStatus::OnDuty => "ON_DUTY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl FromStr for DutyStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DutyStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// One duty-status interval within a day, in hours since midnight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Raw status tag as sent by the API; see [`Activity::status`].
    #[serde(rename = "type", default, deserialize_with = "string_or_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub start: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub end: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub reason: Option<String>,
}

impl Activity {
    pub fn new(status: DutyStatus, start: f64, end: f64) -> Self {
        Self {
            kind: Some(status.as_str().to_string()),
            start: Some(start),
            end: Some(end),
            duration: Some(end - start),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// The recognized duty status, if the raw tag names one.
    pub fn status(&self) -> Option<DutyStatus> {
        self.kind.as_deref().and_then(|kind| kind.parse().ok())
    }

    pub fn is_fuel_stop(&self) -> bool {
        self.status() == Some(DutyStatus::OnDuty)
            && self.reason.as_deref() == Some(FUEL_STOP_REASON)
    }
}

/// One day's log as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    #[serde(default)]
    pub day: u32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub total_miles_driving_today: f64,
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default, deserialize_with = "skip_malformed_entries")]
    pub activities: Vec<Activity>,
}

/// A stop positioned along the route by mile marker only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    #[serde(default, deserialize_with = "number_or_none")]
    pub mile_marker: Option<f64>,
    #[serde(rename = "type", default, deserialize_with = "string_or_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub start: Option<f64>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub reason: Option<String>,
}

impl Stop {
    pub fn at_mile(mile_marker: f64) -> Self {
        Self {
            mile_marker: Some(mile_marker),
            ..Self::default()
        }
    }

    pub fn status(&self) -> Option<DutyStatus> {
        self.kind.as_deref().and_then(|kind| kind.parse().ok())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    #[serde(default)]
    pub path: Vec<LatLng>,
    #[serde(default)]
    pub waypoints: Vec<LatLng>,
    #[serde(default)]
    pub fuel_stops: Vec<Stop>,
    #[serde(default)]
    pub rest_stops: Vec<Stop>,
    #[serde(default)]
    pub total_distance_miles: f64,
    #[serde(default)]
    pub total_duration_hours: f64,
}

/// Body of a successful `POST /trips/create/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub hos_logs: Vec<DayLog>,
    #[serde(default)]
    pub route_info: RouteInfo,
}

fn number_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

/// Decodes a list, dropping entries that are null or not the expected shape.
fn skip_malformed_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let total = entries.len();
    let kept: Vec<T> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if kept.len() < total {
        tracing::warn!(dropped = total - kept.len(), "dropped malformed list entries");
    }
    Ok(kept)
}

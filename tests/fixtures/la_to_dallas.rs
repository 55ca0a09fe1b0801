//! A two-day LA -> Phoenix -> Dallas plan in the API's wire format.

#![allow(dead_code)]

use std::cell::RefCell;

use tripcop::error::TripError;
use tripcop::model::{TripForm, TripResponse};
use tripcop::traits::{Notifier, TripApi};

pub const RESPONSE_JSON: &str = r#"{
  "message": "Trip created successfully",
  "route_info": {
    "total_distance_miles": 1432.7,
    "total_duration_hours": 21.4,
    "path": [
      [34.0522, -118.2437],
      [33.9806, -117.3755],
      [33.7206, -116.2156],
      [33.4484, -112.0740],
      [32.2226, -110.9747],
      [31.7619, -106.4850],
      [31.9973, -102.0779],
      [32.4487, -99.7331],
      [32.7767, -96.7970]
    ],
    "waypoints": [
      [34.0522, -118.2437],
      [33.4484, -112.0740],
      [33.4484, -112.0740],
      [32.7767, -96.7970]
    ],
    "fuel_stops": [
      {"mile_marker": 1000, "reason": "Fuel stop"}
    ],
    "rest_stops": [
      {"day": 1, "type": "SLEEPER_BERTH", "start": 16.0, "duration": 1.75, "mile_marker": 467.5},
      {"day": 2, "type": "OFF_DUTY", "start": 12.0, "duration": 1.0, "mile_marker": 880.25}
    ]
  },
  "hos_logs": [
    {
      "day": 1,
      "date": "2025-01-06",
      "from": "Los Angeles, CA",
      "to": "Enroute",
      "total_miles_driving_today": 467.5,
      "total_hours": 24.0,
      "totals": {"DRIVING": 7.25, "ON_DUTY": 6.5, "OFF_DUTY": 8.5, "SLEEPER_BERTH": 1.75},
      "activities": [
        {"type": "OFF_DUTY", "start": 0.0, "end": 6.0, "duration": 6.0},
        {"type": "ON_DUTY", "start": 6.0, "end": 7.5, "duration": 1.5, "reason": "Pre-trip"},
        {"type": "DRIVING", "start": 7.5, "end": 9.0, "duration": 1.5},
        {"type": "ON_DUTY", "start": 9.0, "end": 9.5, "duration": 0.5, "reason": "Fuel stop"},
        {"type": "DRIVING", "start": 9.5, "end": 12.0, "duration": 2.5},
        {"type": "OFF_DUTY", "start": 12.0, "end": 13.0, "duration": 1.0},
        {"type": "DRIVING", "start": 13.0, "end": 15.0, "duration": 2.0},
        {"type": "ON_DUTY", "start": 15.0, "end": 15.5, "duration": 0.5},
        {"type": "DRIVING", "start": 15.5, "end": 16.0, "duration": 0.5},
        {"type": "SLEEPER_BERTH", "start": 16.0, "end": 17.75, "duration": 1.75},
        {"type": "DRIVING", "start": 17.75, "end": 18.5, "duration": 0.75},
        {"type": "ON_DUTY", "start": 18.5, "end": 22.5, "duration": 4.0},
        {"type": "OFF_DUTY", "start": 22.5, "end": 24.0, "duration": 1.5}
      ]
    },
    {
      "day": 2,
      "date": "2025-01-07",
      "from": "Enroute",
      "to": "Dallas, TX",
      "total_miles_driving_today": 412.75,
      "total_hours": 22.0,
      "activities": [
        {"type": "OFF_DUTY", "start": 0.0, "end": 6.0, "duration": 6.0},
        {"type": "DRIVING", "start": 6.0, "end": 12.0, "duration": 6.0},
        {"type": "OFF_DUTY", "start": 12.0, "end": 13.0, "duration": 1.0},
        {"type": "ON_DUTY", "start": 13.0, "end": 14.0, "duration": 1.0, "reason": "Dropoff"},
        {"type": "OFF_DUTY", "start": 14.0, "end": 22.0, "duration": 8.0},
        {"type": "DRIVING"}
      ]
    }
  ]
}"#;

pub fn response() -> TripResponse {
    serde_json::from_str(RESPONSE_JSON).expect("fixture parses")
}

pub fn form() -> TripForm {
    TripForm {
        current_location: "Los Angeles, CA".to_string(),
        pickup_location: "Phoenix, AZ".to_string(),
        dropoff_location: "Dallas, TX".to_string(),
        current_cycle_used_hours: TripForm::cycle_hours_value("12"),
    }
}

/// Returns a canned outcome and records every form it receives.
pub struct ScriptedApi {
    outcome: fn() -> Result<TripResponse, TripError>,
    pub requests: RefCell<Vec<TripForm>>,
}

impl ScriptedApi {
    pub fn succeeding() -> Self {
        Self {
            outcome: || Ok(response()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: || Err(TripError::Decode(serde_json::from_str::<TripResponse>("<html>").unwrap_err())),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl TripApi for ScriptedApi {
    fn create_trip(&self, form: &TripForm) -> Result<TripResponse, TripError> {
        self.requests.borrow_mut().push(form.clone());
        (self.outcome)()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub alerts: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

//! Page controller: form state, the single trip request, and the view
//! derived from the outcome.
//!
//! Each request cycle moves through an explicit [`RequestState`]:
//! `Idle -> Pending -> Success | Failure`. Transitions consume the old state
//! and return the new one; the view is a pure function of the current state.

use rayon::prelude::*;
use tracing::{error, info};

use crate::config::MapConfig;
use crate::eld_log::DayLogPanel;
use crate::error::TripError;
use crate::map_view::MapScene;
use crate::model::{DayLog, RouteInfo, TripForm, TripResponse};
use crate::traits::{Notifier, TripApi};

/// Message shown to the user when the trip request fails for any reason.
pub const FAILURE_ALERT: &str = "Failed to generate trip. Check backend.";

/// The payload a successful request hands to the renderers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripPlan {
    pub logs: Vec<DayLog>,
    pub route: RouteInfo,
}

impl From<TripResponse> for TripPlan {
    fn from(response: TripResponse) -> Self {
        Self {
            logs: response.hos_logs,
            route: response.route_info,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    Pending,
    Success(TripPlan),
    /// The last request failed; nothing is rendered.
    Failure,
}

impl RequestState {
    /// A new request is in flight. Allowed from any state; an earlier
    /// pending request is not cancelled.
    pub fn submitted(self) -> Self {
        RequestState::Pending
    }

    /// Applies the outcome of a request. The latest completion wins.
    pub fn resolved(self, result: Result<TripResponse, TripError>) -> Self {
        match result {
            Ok(response) => RequestState::Success(TripPlan::from(response)),
            Err(_) => RequestState::Failure,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn plan(&self) -> Option<&TripPlan> {
        match self {
            RequestState::Success(plan) => Some(plan),
            _ => None,
        }
    }
}

/// One day's rendered log panel.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPanel {
    pub day: u32,
    pub has_warning: bool,
    pub svg: String,
}

impl RenderedPanel {
    pub fn render(log: &DayLog) -> Self {
        let panel = DayLogPanel::new(log);
        Self {
            day: log.day,
            has_warning: panel.has_warning(),
            svg: panel.to_svg(),
        }
    }
}

/// What the page shows for the current state.
#[derive(Debug, Clone)]
pub enum PageView {
    /// Idle or failed: no map and no log panels.
    Empty,
    /// Placeholder content while the request is in flight.
    Loading,
    Ready {
        map: Option<MapScene>,
        panels: Vec<RenderedPanel>,
    },
}

impl PageView {
    pub fn render(state: &RequestState, map_config: &MapConfig) -> Self {
        match state {
            RequestState::Idle | RequestState::Failure => PageView::Empty,
            RequestState::Pending => PageView::Loading,
            RequestState::Success(plan) => PageView::Ready {
                map: MapScene::build(&plan.route, map_config),
                panels: plan.logs.par_iter().map(RenderedPanel::render).collect(),
            },
        }
    }

    pub fn map(&self) -> Option<&MapScene> {
        match self {
            PageView::Ready { map, .. } => map.as_ref(),
            _ => None,
        }
    }

    pub fn panels(&self) -> &[RenderedPanel] {
        match self {
            PageView::Ready { panels, .. } => panels,
            _ => &[],
        }
    }

    pub fn marker_count(&self) -> usize {
        self.map().map_or(0, |map| map.markers.len())
    }
}

pub struct PageController<A, N> {
    api: A,
    notifier: N,
    map_config: MapConfig,
    form: TripForm,
    state: RequestState,
}

impl<A, N> PageController<A, N>
where
    A: TripApi,
    N: Notifier,
{
    pub fn new(api: A, notifier: N) -> Self {
        Self::with_map_config(api, notifier, MapConfig::default())
    }

    pub fn with_map_config(api: A, notifier: N, map_config: MapConfig) -> Self {
        Self {
            api,
            notifier,
            map_config,
            form: TripForm::default(),
            state: RequestState::Idle,
        }
    }

    pub fn form(&self) -> &TripForm {
        &self.form
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Sets a form field by its wire name.
    ///
    /// Values are not validated. Cycle hours are kept as typed: numeric text
    /// becomes a JSON number, anything else is sent as the raw string.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), TripError> {
        match name {
            "current_location" => self.form.current_location = value.to_string(),
            "pickup_location" => self.form.pickup_location = value.to_string(),
            "dropoff_location" => self.form.dropoff_location = value.to_string(),
            "current_cycle_used_hours" => {
                self.form.current_cycle_used_hours = TripForm::cycle_hours_value(value);
            }
            other => return Err(TripError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Marks a request as in flight and returns the form snapshot to send.
    pub fn begin_submit(&mut self) -> TripForm {
        self.state = std::mem::take(&mut self.state).submitted();
        self.form.clone()
    }

    /// Applies a request outcome. Failures raise exactly one alert.
    pub fn complete(&mut self, result: Result<TripResponse, TripError>) {
        if let Err(err) = &result {
            error!(error = %err, "trip creation failed");
            self.notifier.alert(FAILURE_ALERT);
        }
        self.state = std::mem::take(&mut self.state).resolved(result);
        if let Some(plan) = self.state.plan() {
            info!(
                days = plan.logs.len(),
                fuel_stops = plan.route.fuel_stops.len(),
                rest_stops = plan.route.rest_stops.len(),
                "trip plan received"
            );
        }
    }

    /// Sends the current form and applies the result.
    pub fn submit(&mut self) -> &RequestState {
        let form = self.begin_submit();
        let result = self.api.create_trip(&form);
        self.complete(result);
        &self.state
    }

    pub fn view(&self) -> PageView {
        PageView::render(&self.state, &self.map_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::cell::{Cell, RefCell};

    struct NoApi;

    /// Fails every request but keeps the form it was sent.
    #[derive(Default)]
    struct CapturingApi {
        sent: RefCell<Vec<TripForm>>,
    }

    impl TripApi for CapturingApi {
        fn create_trip(&self, form: &TripForm) -> Result<TripResponse, TripError> {
            self.sent.borrow_mut().push(form.clone());
            Err(TripError::UnknownField("unused".to_string()))
        }
    }

    impl TripApi for NoApi {
        fn create_trip(&self, _form: &TripForm) -> Result<TripResponse, TripError> {
            Err(TripError::UnknownField("unused".to_string()))
        }
    }

    #[derive(Default)]
    struct CountingNotifier {
        alerts: Cell<usize>,
    }

    impl Notifier for CountingNotifier {
        fn alert(&self, _message: &str) {
            self.alerts.set(self.alerts.get() + 1);
        }
    }

    #[test]
    fn test_state_transitions() {
        let state = RequestState::default();
        assert_eq!(state, RequestState::Idle);

        let state = state.submitted();
        assert!(state.is_pending());

        let state = state.resolved(Ok(TripResponse::default()));
        assert_eq!(state.plan(), Some(&TripPlan::default()));

        let state = state
            .submitted()
            .resolved(Err(TripError::UnknownField("x".to_string())));
        assert_eq!(state, RequestState::Failure);
        assert!(state.plan().is_none());
    }

    #[test]
    fn test_set_field() {
        let notifier = CountingNotifier::default();
        let mut controller = PageController::new(NoApi, &notifier);
        controller.set_field("pickup_location", "Phoenix, AZ").unwrap();
        controller.set_field("current_cycle_used_hours", " 12.5 ").unwrap();
        assert_eq!(controller.form().pickup_location, "Phoenix, AZ");
        assert_eq!(controller.form().current_cycle_used_hours, 12.5);

        controller.set_field("current_cycle_used_hours", "lots").unwrap();
        assert_eq!(controller.form().current_cycle_used_hours, "lots");

        let err = controller.set_field("driver_name", "Sam").unwrap_err();
        assert!(matches!(err, TripError::UnknownField(name) if name == "driver_name"));
    }

    #[test]
    fn test_pending_shows_placeholder() {
        let notifier = CountingNotifier::default();
        let mut controller = PageController::new(NoApi, &notifier);
        assert!(matches!(controller.view(), PageView::Empty));
        controller.begin_submit();
        assert!(matches!(controller.view(), PageView::Loading));
        assert!(controller.view().panels().is_empty());
    }

    #[test]
    fn test_second_submission_while_pending_is_allowed() {
        let notifier = CountingNotifier::default();
        let mut controller = PageController::new(NoApi, &notifier);
        controller.begin_submit();
        controller.begin_submit();
        controller.complete(Ok(TripResponse::default()));
        assert!(controller.state().plan().is_some());
        controller.complete(Err(TripError::UnknownField("late".to_string())));
        assert_eq!(controller.state(), &RequestState::Failure);
        assert_eq!(notifier.alerts.get(), 1);
    }

    #[test]
    fn test_non_numeric_cycle_hours_sent_as_typed() {
        let api = CapturingApi::default();
        let notifier = CountingNotifier::default();
        let mut controller = PageController::new(&api, &notifier);
        controller.set_field("current_cycle_used_hours", "about 30").unwrap();
        controller.submit();

        let sent = api.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].current_cycle_used_hours, Value::from("about 30"));
        assert_eq!(notifier.alerts.get(), 1);
    }
}

//! Blocking HTTP adapter for the trip-planning API.

use tracing::debug;

use crate::config::ApiConfig;
use crate::error::TripError;
use crate::model::{TripForm, TripResponse};
use crate::traits::TripApi;

#[derive(Debug, Clone)]
pub struct TripApiClient {
    config: ApiConfig,
    client: reqwest::blocking::Client,
}

impl TripApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, TripError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl TripApi for TripApiClient {
    fn create_trip(&self, form: &TripForm) -> Result<TripResponse, TripError> {
        let url = self.config.create_trip_url();
        debug!(%url, "posting trip form");

        let body = self
            .client
            .post(&url)
            .json(form)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())?;

        let response: TripResponse = serde_json::from_str(&body)?;
        debug!(
            days = response.hos_logs.len(),
            path_points = response.route_info.path.len(),
            "trip response decoded"
        );
        Ok(response)
    }
}

//! Error type shared by the API client and page controller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TripError {
    #[error("trip request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed trip response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("report rendering failed: {0}")]
    Render(#[from] askama::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unknown form field: {0}")]
    UnknownField(String),
}

use reqwest::StatusCode;
use thiserror::Error;

/// Failures at the market-data provider boundary
#[derive(Debug, Error)]
pub enum DomeError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dome API error: {status} - {body}")]
    Status { status: StatusCode, body: String },

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("Invalid Dome API key: {0}")]
    InvalidApiKey(String),
}

impl DomeError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            DomeError::Status { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }
}

use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("DATA FEED OFFLINE")]
    Offline,

    #[error("Market not found: {0}")]
    MarketNotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ApiError::Offline => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::MarketNotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, self.to_string()).into_response()
    }
}

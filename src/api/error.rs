use crate::utils::error::ScraperError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    InvalidRequest(String),
    Scraper(ScraperError),
}

impl From<ScraperError> for ApiError {
    fn from(err: ScraperError) -> Self {
        Self::Scraper(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Scraper(err) => match err {
                ScraperError::UpstreamError(_) => StatusCode::SERVICE_UNAVAILABLE,
                ScraperError::ExtractionError { .. } => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match self {
            ApiError::InvalidRequest(msg) => msg,
            ApiError::Scraper(err) => {
                if status.is_server_error() {
                    tracing::error!("Search failed: {} ({})", err, err.recovery_suggestion());
                }
                err.to_string()
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

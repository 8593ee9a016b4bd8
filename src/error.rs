use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "Invalid period: {}", _0)]
    InvalidPeriod(String),

    #[display(fmt = "Invalid query: {}", _0)]
    InvalidQuery(String),

    /// The attendance store could not be read. Kept apart from an empty
    /// result so callers never mistake an outage for "no records".
    #[display(fmt = "Failed to load attendance records")]
    Upstream(sqlx::Error),
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Upstream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Upstream(e)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidPeriod(_) | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

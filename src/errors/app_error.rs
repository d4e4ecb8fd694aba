use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the webhook endpoint
///
/// Each variant maps to a fixed status code and JSON body that the platform
/// and the dashboard rely on, so the `error` strings must stay stable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    /// The request body could not be read or parsed as JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// A function-call query named an unknown function or was malformed
    #[error("Unknown function or invalid request")]
    UnknownFunction,

    /// `getLogSession` was called without a session id
    #[error("Session ID is required")]
    MissingSessionId,

    /// A query result could not be rendered as JSON
    #[error("Failed to serialize query result: {0}")]
    Serialization(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidBody(_) | AppError::UnknownFunction | AppError::MissingSessionId => {
                StatusCode::BAD_REQUEST
            }
            AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::InvalidBody(detail) => {
                json!({"error": "Invalid request body", "message": detail})
            }
            AppError::Serialization(_) => json!({"error": "Internal server error"}),
            other => json!({"error": other.to_string()}),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

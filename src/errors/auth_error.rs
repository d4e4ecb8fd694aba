use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing webhook secret header")]
    MissingSecret,

    #[error("Webhook secret mismatch")]
    SecretMismatch,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Both cases look the same to the caller.
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Unauthorized"})),
        )
            .into_response()
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

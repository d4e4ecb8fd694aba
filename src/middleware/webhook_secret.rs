use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::BodyExt;
use std::sync::Arc;

use crate::auth::verify_webhook_secret;
use crate::core::classify;
use crate::errors::app_error::AppError;
use crate::state::AppState;

/// Shared-secret middleware for the webhook route
///
/// When a secret is configured, every payload except a function-call query
/// must carry it in the `x-vapi-secret` header. The exemption follows the
/// payload's classification, so the body is buffered, classified and handed
/// on to the handler unchanged.
///
/// Bodies that are not valid JSON pass through untouched; the handler reports
/// them as `400 Invalid request body`.
///
/// # Returns
/// * `401 {error: "Unauthorized"}` on a missing or mismatching secret, with no
///   side effect
/// * otherwise the response of the next handler
pub async fn webhook_secret_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state
        .config
        .vapi_secret
        .as_deref()
        .filter(|secret| !secret.is_empty())
    else {
        return next.run(request).await;
    };

    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let (parts, body) = request.into_parts();
    let body_bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => return AppError::InvalidBody(e.to_string()).into_response(),
    };

    // Unparseable bodies skip the check and are rejected by the handler.
    let needs_secret = serde_json::from_slice::<serde_json::Value>(&body_bytes)
        .map(|payload| !classify(payload).is_query())
        .unwrap_or(false);

    if needs_secret {
        if let Err(e) = verify_webhook_secret(&parts.headers, expected) {
            tracing::warn!(
                method = %method,
                path = %path,
                reason = %e,
                "Rejected webhook: shared secret check failed"
            );
            return e.into_response();
        }
    }

    let request = Request::from_parts(parts, Body::from(body_bytes));
    next.run(request).await
}

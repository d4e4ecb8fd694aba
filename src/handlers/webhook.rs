//! The `vapi-actions` webhook endpoint

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::{classify, dispatch};
use crate::errors::app_error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::ReceiptTime;

/// Receive a webhook or function-call query
///
/// The body is parsed as untyped JSON, classified by shape and applied to the
/// history store. See [`crate::core::payload`] for the classification order.
/// The shared-secret check runs earlier, in
/// [`webhook_secret_middleware`](crate::middleware::webhook_secret_middleware).
pub async fn vapi_actions(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Response> {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Failed to parse webhook body");
        AppError::InvalidBody(e.to_string())
    })?;

    let received = ReceiptTime::now();
    let payload = classify(payload);
    debug!(kind = payload.label(), "Classified webhook payload");

    let outcome = dispatch(&state.store, payload, &received)?;
    Ok(outcome.into_response())
}

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers::{api, webhook};
use crate::middleware::webhook_secret_middleware;
use crate::state::AppState;

/// Path of the webhook and function-call endpoint
pub const WEBHOOK_PATH: &str = "/api/vapi-actions";

/// Create the webhook router
///
/// The shared-secret middleware is bound here because it only applies to the
/// webhook route.
pub fn create_webhook_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(WEBHOOK_PATH, post(webhook::vapi_actions))
        .layer(middleware::from_fn_with_state(
            state,
            webhook_secret_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

/// Create the full application router (public health check + webhook route)
/// with state attached. CORS and security headers are layered on in main.rs.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::health_check))
        .merge(create_webhook_router(state.clone()))
        .with_state(state)
}

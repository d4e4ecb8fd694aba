use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;
use crate::store::{HistoryCounts, HistoryLimits};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub history: HistoryCounts,
    pub limits: HistoryLimits,
}

/// Health check with the current size of each history collection
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        history: state.store.counts(),
        limits: state.store.limits(),
    })
}

//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub prediction_backend: BackendHealth,
}

#[derive(Serialize)]
pub struct BackendHealth {
    pub enabled: bool,
    pub url: String,
    pub reachable: bool,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let enabled = state.config.prediction_backend.enabled;
    // Only probe the prediction backend when it is in use
    let reachable = enabled && state.prediction.is_available().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        prediction_backend: BackendHealth {
            enabled,
            url: state.prediction.base_url().to_string(),
            reachable,
        },
    })
}

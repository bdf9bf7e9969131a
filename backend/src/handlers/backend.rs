//! Pass-through handlers for the prediction backend

use axum::{
    extract::{Query, State},
    Json,
};
use shared::validate_forecast_days;

use super::ForecastQuery;
use crate::error::{AppError, AppResult};
use crate::AppState;

fn ensure_enabled(state: &AppState) -> AppResult<()> {
    if state.config.prediction_backend.enabled {
        Ok(())
    } else {
        Err(AppError::Configuration(
            "Prediction backend is disabled".to_string(),
        ))
    }
}

/// Backend weather for a coordinate
pub async fn backend_weather(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_enabled(&state)?;
    let coords = query.coordinates()?;
    let days = query.days();
    validate_forecast_days(days).map_err(|m| AppError::invalid("days", m))?;

    let weather = state.prediction.weather(coords.lat, coords.lng, days).await?;
    Ok(Json(weather))
}

/// Backend market snapshot
pub async fn backend_market(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    ensure_enabled(&state)?;
    let market = state.prediction.market().await?;
    Ok(Json(market))
}

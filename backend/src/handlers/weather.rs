//! HTTP handlers for weather endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{ClimateData, Coordinates, WeatherData, WeatherForecast};

use super::CoordinateQuery;
use crate::error::AppResult;
use crate::services::WeatherService;
use crate::AppState;

/// Default forecast length in days
pub const DEFAULT_FORECAST_DAYS: u32 = 7;

/// Query parameters for a forecast
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub lat: f64,
    pub lng: f64,
    pub days: Option<u32>,
}

impl ForecastQuery {
    pub fn coordinates(&self) -> AppResult<Coordinates> {
        CoordinateQuery {
            lat: self.lat,
            lng: self.lng,
        }
        .coordinates()
    }

    pub fn days(&self) -> u32 {
        self.days.unwrap_or(DEFAULT_FORECAST_DAYS)
    }
}

/// Current conditions, live or estimated
pub async fn current_weather(
    State(state): State<AppState>,
    Query(query): Query<CoordinateQuery>,
) -> AppResult<Json<WeatherData>> {
    let coords = query.coordinates()?;
    let service = WeatherService::new(state.weather);
    Ok(Json(service.current_weather(coords.lat, coords.lng).await))
}

/// Daily forecast; `days` is clamped to 1..=14
pub async fn weather_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<WeatherForecast>> {
    let coords = query.coordinates()?;
    let service = WeatherService::new(state.weather);
    let forecast = service.forecast(coords.lat, coords.lng, query.days()).await;
    Ok(Json(forecast))
}

#[derive(Debug, Serialize)]
pub struct ClimateResponse {
    pub weather: WeatherData,
    pub climate: ClimateData,
}

/// Climate summary alongside the weather it was derived from
pub async fn climate_summary(
    State(state): State<AppState>,
    Query(query): Query<CoordinateQuery>,
) -> AppResult<Json<ClimateResponse>> {
    let coords = query.coordinates()?;
    let service = WeatherService::new(state.weather);
    let (weather, climate) = service.weather_and_climate(coords.lat, coords.lng).await;
    Ok(Json(ClimateResponse { weather, climate }))
}

//! HTTP handlers for location endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use shared::{validate_place_name, LocationResult, ReverseGeocodingResult};

use super::{CoordinateQuery, TextQuery};
use crate::error::{AppError, AppResult};
use crate::services::LocationService;
use crate::AppState;

/// Resolve a place name through the geocoding chain
pub async fn resolve_location(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> AppResult<Json<LocationResult>> {
    validate_place_name(&query.q).map_err(|m| AppError::invalid("q", m))?;
    let service = LocationService::new(state.geocoding);
    Ok(Json(service.resolve(&query.q).await))
}

/// Resolve coordinates to an address
pub async fn reverse_geocode(
    State(state): State<AppState>,
    Query(query): Query<CoordinateQuery>,
) -> AppResult<Json<ReverseGeocodingResult>> {
    let coords = query.coordinates()?;
    let service = LocationService::new(state.geocoding);
    let result = service.reverse(coords).await?;
    Ok(Json(result))
}

/// Place suggestions for a partial name
pub async fn search_places(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> Json<Vec<LocationResult>> {
    let service = LocationService::new(state.geocoding);
    Json(service.search(&query.q).await)
}

/// Browser GPS acquisition settings
#[derive(Debug, Serialize)]
pub struct GpsSettings {
    pub timeout_ms: u32,
    pub high_accuracy: bool,
    pub fallback_location: String,
}

pub async fn gps_settings(State(state): State<AppState>) -> Json<GpsSettings> {
    Json(GpsSettings {
        timeout_ms: state.config.gps.timeout_ms,
        high_accuracy: true,
        fallback_location: state.config.gps.fallback_location.clone(),
    })
}

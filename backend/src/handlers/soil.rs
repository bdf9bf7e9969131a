//! HTTP handlers for soil endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{CropSuitability, SoilData};
use validator::Validate;

use super::CoordinateQuery;
use crate::error::AppResult;
use crate::services::SoilService;
use crate::AppState;

/// Soil analysis for a coordinate
pub async fn soil_analysis(
    State(state): State<AppState>,
    Query(query): Query<CoordinateQuery>,
) -> AppResult<Json<SoilData>> {
    let coords = query.coordinates()?;
    let service = SoilService::new(state.soil);
    Ok(Json(service.soil_data(coords.lat, coords.lng).await))
}

/// Query parameters for crop suitability
#[derive(Debug, Deserialize, Validate)]
pub struct SuitabilityQuery {
    pub lat: f64,
    pub lng: f64,
    #[validate(length(min = 1, max = 50, message = "Crop name is required"))]
    pub crop: String,
}

/// How well the local soil suits a crop
pub async fn crop_suitability(
    State(state): State<AppState>,
    Query(query): Query<SuitabilityQuery>,
) -> AppResult<Json<CropSuitability>> {
    query.validate()?;
    let coords = CoordinateQuery {
        lat: query.lat,
        lng: query.lng,
    }
    .coordinates()?;

    let service = SoilService::new(state.soil);
    let suitability = service
        .crop_suitability(coords.lat, coords.lng, &query.crop)
        .await;
    Ok(Json(suitability))
}

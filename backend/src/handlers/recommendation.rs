//! HTTP handlers for crop recommendations

use axum::{extract::State, Json};
use serde::Deserialize;
use shared::{Coordinates, GpsError, MISSING_LOCATION_MESSAGE};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::recommendation::{LocationQuery, RecommendationResponse};
use crate::services::RecommendationService;
use crate::AppState;

fn default_use_backend() -> bool {
    true
}

/// Recommendation request: a place name or a coordinate pair
#[derive(Debug, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[validate(length(max = 200, message = "Location name is too long"))]
    pub location: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: Option<f64>,
    #[serde(default = "default_use_backend")]
    pub use_backend: bool,
}

impl RecommendationRequest {
    /// Coordinates win over a place name when both are given
    pub fn query(&self) -> AppResult<LocationQuery> {
        self.validate()?;
        match (self.latitude, self.longitude, self.location.as_deref()) {
            (Some(lat), Some(lng), _) => Ok(LocationQuery::Coordinates(Coordinates::new(lat, lng))),
            (_, _, Some(name)) if !name.trim().is_empty() => {
                Ok(LocationQuery::Place(name.trim().to_string()))
            }
            _ => Err(AppError::invalid("location", MISSING_LOCATION_MESSAGE)),
        }
    }
}

/// Recommendations for a place name or coordinates
pub async fn create_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let query = request.query()?;
    let service = RecommendationService::new(&state);
    let response = service.recommend(query, request.use_backend).await?;
    Ok(Json(response))
}

/// What the browser's geolocation call produced
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GpsReport {
    Fix { latitude: f64, longitude: f64 },
    Failure { error: GpsError },
}

impl GpsReport {
    pub fn into_result(self) -> Result<Coordinates, GpsError> {
        match self {
            GpsReport::Fix {
                latitude,
                longitude,
            } => Ok(Coordinates::new(latitude, longitude)),
            GpsReport::Failure { error } => Err(error),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GpsRecommendationRequest {
    pub report: GpsReport,
    #[serde(default = "default_use_backend")]
    pub use_backend: bool,
}

/// Recommendations from a GPS outcome; failures use the fallback location
pub async fn create_gps_recommendations(
    State(state): State<AppState>,
    Json(request): Json<GpsRecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let service = RecommendationService::new(&state);
    let response = service
        .recommend_from_gps(request.report.into_result(), request.use_backend)
        .await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_take_precedence() {
        let request: RecommendationRequest = serde_json::from_str(
            r#"{"location": "Pune", "latitude": 19.99, "longitude": 73.78}"#,
        )
        .unwrap();
        assert!(request.use_backend);
        assert_eq!(
            request.query().unwrap(),
            LocationQuery::Coordinates(Coordinates::new(19.99, 73.78))
        );
    }

    #[test]
    fn test_blank_location_is_rejected() {
        let request: RecommendationRequest =
            serde_json::from_str(r#"{"location": "   "}"#).unwrap();
        match request.query() {
            Err(AppError::Validation { field, message }) => {
                assert_eq!(field, "location");
                assert_eq!(message, MISSING_LOCATION_MESSAGE);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_latitude_is_rejected() {
        let request: RecommendationRequest =
            serde_json::from_str(r#"{"latitude": 120.0, "longitude": 73.0}"#).unwrap();
        assert!(matches!(
            request.query(),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_gps_report_wire_format() {
        let request: GpsRecommendationRequest = serde_json::from_str(
            r#"{"report": {"outcome": "failure", "error": {"kind": "timeout"}}, "use_backend": false}"#,
        )
        .unwrap();
        assert!(!request.use_backend);
        assert_eq!(request.report.into_result(), Err(GpsError::Timeout));

        let fix: GpsReport =
            serde_json::from_str(r#"{"outcome": "fix", "latitude": 19.69, "longitude": 72.76}"#)
                .unwrap();
        assert_eq!(fix.into_result(), Ok(Coordinates::new(19.69, 72.76)));
    }
}

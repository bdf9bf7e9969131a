//! Crop recommendation orchestration
//!
//! Resolves the location, aggregates the environment and, when the
//! prediction backend is healthy, runs its analysis concurrently. Every
//! path ends in `RecommendationsReady` with a non-empty list.

use serde::{Deserialize, Serialize};
use shared::{
    map_predictions, recommend_for_location, validate_coordinates, validate_place_name,
    BackendAnalysis, Coordinates, CropRecommendation, FlowEvent, FlowState, GeocodeSource,
    GpsError, LocationProfile, LocationRequest, Notice, RecommendationFlow,
};

use super::environment::{unresolved_place_profile, EnvironmentService};
use super::location::LocationService;
use super::market::MarketService;
use super::soil::SoilService;
use super::weather::WeatherService;
use crate::error::{AppError, AppResult};
use crate::external::PredictionClient;
use crate::AppState;

/// What the user asked recommendations for
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Place(String),
    Coordinates(Coordinates),
}

/// Which engine produced the recommendation list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Location-name scoring table
    StaticTable,
    PredictionBackend,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub profile: LocationProfile,
    pub recommendations: Vec<CropRecommendation>,
    pub source: RecommendationSource,
    pub state: FlowState,
    pub flow: Vec<FlowState>,
    pub notices: Vec<Notice>,
}

/// Result of the optional backend-assisted path
#[derive(Debug)]
enum BackendOutcome {
    Skipped,
    Unavailable,
    Completed(BackendAnalysis),
    Failed(AppError),
}

/// Recommendation service
#[derive(Clone)]
pub struct RecommendationService {
    location: LocationService,
    environment: EnvironmentService,
    prediction: PredictionClient,
    backend_enabled: bool,
    gps_fallback: String,
}

impl RecommendationService {
    /// Create a new RecommendationService from shared application state
    pub fn new(state: &AppState) -> Self {
        Self {
            location: LocationService::new(state.geocoding.clone()),
            environment: EnvironmentService::new(
                WeatherService::new(state.weather.clone()),
                SoilService::new(state.soil.clone()),
                MarketService::new(state.market.clone()),
            ),
            prediction: state.prediction.clone(),
            backend_enabled: state.config.prediction_backend.enabled,
            gps_fallback: state.config.gps.fallback_location.clone(),
        }
    }

    /// Build recommendations for a place name or coordinate pair
    pub async fn recommend(
        &self,
        query: LocationQuery,
        use_backend: bool,
    ) -> AppResult<RecommendationResponse> {
        match query {
            LocationQuery::Place(name) => {
                validate_place_name(&name).map_err(|m| AppError::invalid("location", m))?;
                self.recommend_for_place(name.trim(), use_backend, Vec::new())
                    .await
            }
            LocationQuery::Coordinates(coords) => {
                validate_coordinates(&coords).map_err(|m| AppError::invalid("coordinates", m))?;
                self.recommend_for_coordinates(coords, use_backend).await
            }
        }
    }

    /// Build recommendations from a browser GPS outcome.
    ///
    /// Any failure switches to the configured fallback location.
    pub async fn recommend_from_gps(
        &self,
        outcome: Result<Coordinates, GpsError>,
        use_backend: bool,
    ) -> AppResult<RecommendationResponse> {
        match outcome {
            Ok(coords) => {
                validate_coordinates(&coords).map_err(|m| AppError::invalid("coordinates", m))?;
                self.recommend_for_coordinates(coords, use_backend).await
            }
            Err(error) => {
                tracing::warn!("GPS failed ({}), falling back to {}", error, self.gps_fallback);
                let notices = vec![Notice::error(error.fallback_notice_for(&self.gps_fallback))];
                self.recommend_for_place(&self.gps_fallback, use_backend, notices)
                    .await
            }
        }
    }

    async fn recommend_for_place(
        &self,
        place_name: &str,
        use_backend: bool,
        mut notices: Vec<Notice>,
    ) -> AppResult<RecommendationResponse> {
        let mut flow = start_flow()?;

        let environment = async {
            let location = self.location.resolve(place_name).await;
            if location.source == GeocodeSource::Estimated {
                None
            } else {
                let env = self.environment.gather(location.coordinates).await;
                Some(env.into_place_profile(place_name, location.name))
            }
        };
        let backend = self.backend_analysis(LocationRequest::by_name(place_name), use_backend);
        let (environment, backend) = tokio::join!(environment, backend);

        let profile = match environment {
            Some((profile, env_notices)) => {
                notices.extend(env_notices);
                profile
            }
            None => {
                flow.apply(FlowEvent::FetchFailed)?;
                notices.push(Notice::error(
                    "Failed to fetch location data - using regional estimates",
                ));
                notices.push(Notice::success(
                    "Using estimated regional data - generating recommendations...",
                ));
                unresolved_place_profile(place_name)
            }
        };

        finish(flow, profile, backend, notices)
    }

    async fn recommend_for_coordinates(
        &self,
        coords: Coordinates,
        use_backend: bool,
    ) -> AppResult<RecommendationResponse> {
        let mut flow = start_flow()?;
        let mut notices = Vec::new();

        let request = LocationRequest::by_coordinates(coords.lat, coords.lng);
        let (address, env, backend) = tokio::join!(
            self.location.reverse(coords),
            self.environment.gather(coords),
            self.backend_analysis(request, use_backend),
        );

        let profile = match address {
            Ok(address) => {
                let (profile, env_notices) = env.into_coordinate_profile(address.name);
                notices.extend(env_notices);
                profile
            }
            Err(e) => {
                tracing::warn!("Coordinate lookup failed, using minimal profile: {}", e);
                flow.apply(FlowEvent::FetchFailed)?;
                notices.push(Notice::error(
                    "Failed to fetch location data - using regional estimates",
                ));
                notices.push(Notice::success(
                    "Using estimated regional data - generating recommendations...",
                ));
                LocationProfile::minimal(coords)
            }
        };

        finish(flow, profile, backend, notices)
    }

    async fn backend_analysis(&self, request: LocationRequest, requested: bool) -> BackendOutcome {
        if !requested || !self.backend_enabled {
            return BackendOutcome::Skipped;
        }
        if !self.prediction.is_available().await {
            return BackendOutcome::Unavailable;
        }
        match self.prediction.location_analysis(&request).await {
            Ok(analysis) => BackendOutcome::Completed(analysis),
            Err(e) => {
                tracing::warn!("Prediction backend analysis failed: {}", e);
                BackendOutcome::Failed(e)
            }
        }
    }
}

fn start_flow() -> AppResult<RecommendationFlow> {
    let mut flow = RecommendationFlow::new();
    flow.apply(FlowEvent::EnterLocation)?;
    flow.apply(FlowEvent::StartFetch)?;
    Ok(flow)
}

/// Merge the backend outcome, score, and close the flow
fn finish(
    mut flow: RecommendationFlow,
    mut profile: LocationProfile,
    backend: BackendOutcome,
    mut notices: Vec<Notice>,
) -> AppResult<RecommendationResponse> {
    let mut backend_recommendations = None;

    match backend {
        BackendOutcome::Completed(analysis) => {
            let soil = &analysis.soil_data;
            notices.push(Notice::success(format!(
                "Soil data loaded from our advanced analysis server! N:{}, P:{}, K:{}, pH:{}",
                soil.n, soil.p, soil.k, soil.ph
            )));
            let mapped = map_predictions(&analysis.crop_recommendations);
            if !mapped.is_empty() {
                notices.push(Notice::success(format!(
                    "Found {} optimal crop recommendations based on soil analysis!",
                    mapped.len()
                )));
                backend_recommendations = Some(mapped);
            }
            profile.apply_backend(analysis);
        }
        BackendOutcome::Failed(e) => {
            notices.push(Notice::error(format!("Server data fetch failed: {}", e)));
        }
        BackendOutcome::Unavailable => {
            notices.push(Notice::info(
                "Prediction server not reachable - using built-in recommendations",
            ));
        }
        BackendOutcome::Skipped => {}
    }

    let (recommendations, source, basis) = match backend_recommendations {
        Some(recommendations) => (
            recommendations,
            RecommendationSource::PredictionBackend,
            "AI analysis",
        ),
        None => (
            recommend_for_location(&profile.name),
            RecommendationSource::StaticTable,
            "environmental data",
        ),
    };

    let state = flow.apply(FlowEvent::EnvironmentLoaded)?;
    notices.push(Notice::success(format!(
        "Analysis completed! Found {} optimal crop recommendations based on {}.",
        recommendations.len(),
        basis
    )));

    tracing::info!(
        "Recommendations for '{}': {} crops from {:?} (fallback defaults: {})",
        profile.name,
        recommendations.len(),
        source,
        flow.used_fallback()
    );

    Ok(RecommendationResponse {
        profile,
        recommendations,
        source,
        state,
        flow: flow.trail().to_vec(),
        notices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_without_backend_uses_static_table() {
        let flow = start_flow().unwrap();
        let mut profile = LocationProfile::minimal(Coordinates::new(20.0, 74.0));
        profile.name = "Nashik".to_string();

        let response = finish(flow, profile, BackendOutcome::Skipped, Vec::new()).unwrap();
        assert_eq!(response.source, RecommendationSource::StaticTable);
        assert_eq!(response.recommendations.len(), 3);
        assert_eq!(response.recommendations[0].name, "Onion");
        assert_eq!(response.state, FlowState::RecommendationsReady);
        assert_eq!(response.flow.len(), 4);
    }

    #[test]
    fn test_finish_reports_backend_failure() {
        let flow = start_flow().unwrap();
        let profile = LocationProfile::minimal(Coordinates::new(20.0, 74.0));
        let response = finish(
            flow,
            profile,
            BackendOutcome::Failed(AppError::PredictionBackend("timeout".into())),
            Vec::new(),
        )
        .unwrap();

        assert_eq!(response.source, RecommendationSource::StaticTable);
        assert!(response.notices[0].message.starts_with("Server data fetch failed"));
    }
}

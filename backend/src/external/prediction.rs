//! Client for the external crop prediction backend
//!
//! The backend is optional. It serves soil lookups and probability-ranked
//! crop predictions, plus weather and market pass-through endpoints.

use std::time::Duration;

use reqwest::Client;
use shared::{
    BackendAnalysis, CropPredictionRequest, CropPredictionResponse, HealthStatus,
    LocationRequest, SoilDataResponse,
};

use super::read_json;
use crate::config::PredictionBackendConfig;
use crate::error::{AppError, AppResult};

/// Prediction backend client
#[derive(Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    health_timeout: Duration,
}

impl PredictionClient {
    pub fn new(config: &PredictionBackendConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(config.timeout_ms),
            health_timeout: Duration::from_millis(config.health_timeout_ms),
        }
    }

    /// Create a new PredictionClient with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self::new(&PredictionBackendConfig {
            base_url,
            ..Default::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`
    pub async fn health(&self) -> AppResult<HealthStatus> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(backend_error)?;

        read_json(response, "Prediction backend")
            .await
            .map_err(into_backend_error)
    }

    /// True only when `/health` answers with `{"status": "ok"}`
    pub async fn is_available(&self) -> bool {
        match self.health().await {
            Ok(status) => {
                tracing::debug!("Prediction backend health: {:?}", status);
                status.is_ok()
            }
            Err(e) => {
                tracing::warn!("Prediction backend unreachable: {}", e);
                false
            }
        }
    }

    /// `POST /soil-data`
    pub async fn soil_data(&self, request: &LocationRequest) -> AppResult<SoilDataResponse> {
        let response = self
            .client
            .post(format!("{}/soil-data", self.base_url))
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(backend_error)?;

        read_json(response, "Prediction backend")
            .await
            .map_err(into_backend_error)
    }

    /// `POST /predict`
    pub async fn predict(&self, request: &CropPredictionRequest) -> AppResult<CropPredictionResponse> {
        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(backend_error)?;

        read_json(response, "Prediction backend")
            .await
            .map_err(into_backend_error)
    }

    /// Soil lookup followed by a prediction on the returned parameters
    pub async fn location_analysis(&self, request: &LocationRequest) -> AppResult<BackendAnalysis> {
        let soil_data = self.soil_data(request).await?;
        let crop_recommendations = self.predict(&CropPredictionRequest::from(&soil_data)).await?;
        Ok(BackendAnalysis {
            soil_data,
            crop_recommendations,
        })
    }

    /// `GET /weather` pass-through
    pub async fn weather(&self, lat: f64, lon: f64, days: u32) -> AppResult<serde_json::Value> {
        let response = self
            .client
            .get(format!("{}/weather", self.base_url))
            .timeout(self.timeout)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("days", days.to_string()),
            ])
            .send()
            .await
            .map_err(backend_error)?;

        read_json(response, "Prediction backend")
            .await
            .map_err(into_backend_error)
    }

    /// `GET /market` pass-through
    pub async fn market(&self) -> AppResult<serde_json::Value> {
        let response = self
            .client
            .get(format!("{}/market", self.base_url))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(backend_error)?;

        read_json(response, "Prediction backend")
            .await
            .map_err(into_backend_error)
    }
}

fn backend_error(e: reqwest::Error) -> AppError {
    AppError::PredictionBackend(format!("request failed: {}", e))
}

fn into_backend_error(e: AppError) -> AppError {
    match e {
        AppError::ExternalService(msg) => AppError::PredictionBackend(msg),
        other => other,
    }
}

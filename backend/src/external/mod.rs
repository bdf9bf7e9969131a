//! External API integrations

pub mod geocoding;
pub mod market;
pub mod prediction;
pub mod soil_grids;
pub mod weather;

pub use geocoding::GeocodingClient;
pub use market::MarketClient;
pub use prediction::PredictionClient;
pub use soil_grids::SoilGridsClient;
pub use weather::WeatherClient;

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// Per-call budget for third-party providers
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client with a fixed request timeout
pub(crate) fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Check the status and decode a JSON body, tagging errors with the provider
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    provider: &str,
) -> AppResult<T> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::ExternalService(format!(
            "{} API error: {} - {}",
            provider, status, body
        )));
    }

    response.json().await.map_err(|e| {
        AppError::ExternalService(format!(
            "Failed to parse {} response: {}",
            provider,
            e.without_url()
        ))
    })
}

/// Request URLs can carry API keys, so they are stripped before the error is logged
pub(crate) fn request_failed(provider: &str, e: reqwest::Error) -> AppError {
    AppError::ExternalService(format!(
        "{} API request failed: {}",
        provider,
        e.without_url()
    ))
}

//! Weather service: live conditions with deterministic regional fallbacks

use chrono::{Datelike, Duration, NaiveDateTime, Timelike, Utc};
use shared::{
    clamp_forecast_days, regional_forecast_estimate, regional_weather_estimate, ClimateData,
    WeatherData, WeatherForecast,
};

use crate::external::WeatherClient;

/// India Standard Time offset, used for season and time-of-day estimates
const IST_OFFSET_SECS: i64 = 5 * 3600 + 1800;

/// Current wall-clock time in India
pub fn india_now() -> NaiveDateTime {
    Utc::now().naive_utc() + Duration::seconds(IST_OFFSET_SECS)
}

/// Weather service
#[derive(Clone)]
pub struct WeatherService {
    client: WeatherClient,
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }

    /// Current conditions, or the regional estimate when the provider fails
    pub async fn current_weather(&self, lat: f64, lng: f64) -> WeatherData {
        match self.client.get_current_weather(lat, lng).await {
            Ok(weather) => weather,
            Err(e) => {
                tracing::warn!("Weather provider failed for ({}, {}): {}", lat, lng, e);
                let now = india_now();
                regional_weather_estimate(lat, now.month(), now.hour())
            }
        }
    }

    /// Current conditions together with the climate summary derived from them
    pub async fn weather_and_climate(&self, lat: f64, lng: f64) -> (WeatherData, ClimateData) {
        let weather = self.current_weather(lat, lng).await;
        let climate = ClimateData::derive(&weather, lat, india_now().month());
        (weather, climate)
    }

    /// Daily forecast, or a synthetic one when the provider fails
    pub async fn forecast(&self, lat: f64, lng: f64, days: u32) -> WeatherForecast {
        let days = clamp_forecast_days(days);
        match self.client.get_forecast(lat, lng, days).await {
            Ok(forecast) if !forecast.days.is_empty() => forecast,
            Ok(_) => {
                tracing::warn!("Forecast provider returned no days for ({}, {})", lat, lng);
                regional_forecast_estimate(lat, lng, india_now().date(), days)
            }
            Err(e) => {
                tracing::warn!("Forecast provider failed for ({}, {}): {}", lat, lng, e);
                regional_forecast_estimate(lat, lng, india_now().date(), days)
            }
        }
    }
}

//! Weather API client for fetching weather data
//!
//! Integrates with OpenWeatherMap for current conditions and Open-Meteo
//! for daily forecasts (no key required).

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use shared::{
    clamp_forecast_days, describe_weather_code, round_to, DailyForecast, DataSource, WeatherData,
    WeatherForecast,
};

use super::{http_client, read_json, request_failed, PROVIDER_TIMEOUT};
use crate::config::{configured_key, WeatherConfig};
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    forecast_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    #[serde(default)]
    weather: Vec<OWMWeather>,
    main: OWMMain,
    visibility: Option<f64>,
    wind: OWMWind,
    rain: Option<OWMRain>,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    feels_like: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

/// Open-Meteo daily forecast response
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    latitude: f64,
    longitude: f64,
    daily: OpenMeteoDaily,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoDaily {
    time: Vec<NaiveDate>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
    weather_code: Vec<Option<i32>>,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            client: http_client(PROVIDER_TIMEOUT),
            api_key: configured_key(&config.api_key).map(String::from),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            forecast_url: config.forecast_url.clone(),
        }
    }

    /// Create a new WeatherClient with custom base URLs (for testing)
    pub fn with_base_url(api_key: Option<String>, base_url: String, forecast_url: String) -> Self {
        Self::new(&WeatherConfig {
            api_key,
            base_url,
            forecast_url,
        })
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current_weather(&self, latitude: f64, longitude: f64) -> AppResult<WeatherData> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AppError::WeatherServiceUnavailable)?;

        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| request_failed("Weather", e))?;

        let data: OWMCurrentResponse = read_json(response, "Weather").await?;
        Ok(convert_current_response(data))
    }

    /// Fetch a daily forecast of `days` days (clamped to 1..=14)
    pub async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> AppResult<WeatherForecast> {
        let days = clamp_forecast_days(days).to_string();
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();

        let response = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,precipitation_sum,weather_code",
                ),
                ("timezone", "auto"),
                ("forecast_days", days.as_str()),
            ])
            .send()
            .await
            .map_err(|e| request_failed("Forecast", e))?;

        let data: OpenMeteoResponse = read_json(response, "Forecast").await?;
        Ok(convert_forecast_response(data))
    }
}

/// Convert OpenWeatherMap current response to our format
fn convert_current_response(data: OWMCurrentResponse) -> WeatherData {
    let weather = data.weather.first();
    let rainfall = data
        .rain
        .as_ref()
        .and_then(|r| r.one_hour.or(r.three_hour))
        .unwrap_or(0.0);

    WeatherData {
        temperature: data.main.temp.round(),
        humidity: data.main.humidity,
        rainfall,
        wind_speed: data.wind.speed,
        pressure: data.main.pressure,
        description: weather.map(|w| w.description.clone()).unwrap_or_default(),
        icon: weather.map(|w| w.icon.clone()).unwrap_or_default(),
        feels_like: data.main.feels_like.round(),
        visibility: round_to(data.visibility.unwrap_or(10_000.0) / 1000.0, 1),
        source: DataSource::Live,
    }
}

/// Convert Open-Meteo daily arrays into per-day records
fn convert_forecast_response(data: OpenMeteoResponse) -> WeatherForecast {
    let daily = data.daily;
    let days = daily
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let precipitation = daily.precipitation_sum.get(i).copied().flatten().unwrap_or(0.0);
            let code = daily.weather_code.get(i).copied().flatten().unwrap_or(-1);
            DailyForecast {
                date: *date,
                temp_max: daily.temperature_2m_max.get(i).copied().flatten().unwrap_or(0.0).round(),
                temp_min: daily.temperature_2m_min.get(i).copied().flatten().unwrap_or(0.0).round(),
                precipitation_mm: precipitation,
                description: describe_weather_code(code).to_string(),
            }
        })
        .collect();

    WeatherForecast {
        latitude: data.latitude,
        longitude: data.longitude,
        days,
        source: DataSource::Live,
    }
}

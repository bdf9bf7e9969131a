//! Weather and climate models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::DataSource;

/// Current weather conditions at a point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherData {
    pub temperature: f64,
    pub humidity: f64,
    /// Millimetres of rain in the last hour (or three hours)
    pub rainfall: f64,
    pub wind_speed: f64,
    pub pressure: f64,
    pub description: String,
    pub icon: String,
    pub feels_like: f64,
    /// Kilometres
    pub visibility: f64,
    pub source: DataSource,
}

/// Growing season
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Season {
    Summer,
    Monsoon,
    Winter,
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Summer => write!(f, "Summer"),
            Season::Monsoon => write!(f, "Monsoon"),
            Season::Winter => write!(f, "Winter"),
        }
    }
}

/// Classify the season for the Indian subcontinent by calendar month (1-12)
pub fn classify_season(month: u32) -> Season {
    match month {
        6..=9 => Season::Monsoon,
        3..=5 => Season::Summer,
        _ => Season::Winter,
    }
}

/// Climate zone label by latitude band
pub fn classify_climate(lat: f64) -> &'static str {
    if lat > 28.0 {
        "Subtropical"
    } else if lat < 15.0 {
        "Tropical"
    } else {
        "Tropical Monsoon"
    }
}

/// Rough annual rainfall estimate in millimetres
pub fn estimate_avg_rainfall(season: Season, lat: f64) -> f64 {
    if lat < 20.0 {
        1500.0
    } else if season == Season::Monsoon {
        1200.0
    } else {
        800.0
    }
}

/// Seasonal climate summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClimateData {
    pub avg_temperature: f64,
    pub avg_rainfall: f64,
    pub avg_humidity: f64,
    pub climate: String,
    pub season: Season,
}

impl ClimateData {
    /// Derive a climate summary from current conditions
    pub fn derive(weather: &WeatherData, lat: f64, month: u32) -> Self {
        let season = classify_season(month);
        Self {
            avg_temperature: weather.temperature,
            avg_rainfall: estimate_avg_rainfall(season, lat),
            avg_humidity: weather.humidity,
            climate: classify_climate(lat).to_string(),
            season,
        }
    }
}

/// One day of a forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temp_max: f64,
    pub temp_min: f64,
    pub precipitation_mm: f64,
    pub description: String,
}

/// Multi-day forecast for a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherForecast {
    pub latitude: f64,
    pub longitude: f64,
    pub days: Vec<DailyForecast>,
    pub source: DataSource,
}

/// Maximum number of forecast days a client may request
pub const MAX_FORECAST_DAYS: u32 = 14;

/// Clamp a requested forecast length into 1..=14
pub fn clamp_forecast_days(days: u32) -> u32 {
    days.clamp(1, MAX_FORECAST_DAYS)
}

/// Describe a WMO weather interpretation code
pub fn describe_weather_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1..=3 => "Partly cloudy",
        45 | 48 => "Fog",
        51..=57 => "Drizzle",
        61..=67 => "Rain",
        71..=77 => "Snow",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95..=99 => "Thunderstorm",
        _ => "Unknown",
    }
}

/// Deterministic regional estimate used when no live provider answers.
///
/// Starts from a seasonal base and shifts it by time of day and latitude.
pub fn regional_weather_estimate(lat: f64, month: u32, hour: u32) -> WeatherData {
    let season = classify_season(month);
    let (mut temperature, mut humidity, rainfall, description, icon) = match season {
        Season::Monsoon => (26.0_f64, 85.0_f64, 12.0, "Monsoon showers", "10d"),
        Season::Summer => (35.0, 45.0, 0.0, "Hot", "01d"),
        Season::Winter => (22.0, 55.0, 0.0, "Clear sky", "01d"),
    };

    temperature += match hour {
        6..=10 => -3.0,
        11..=16 => 3.0,
        17..=20 => 1.0,
        _ => -5.0,
    };

    if lat < 18.0 {
        temperature += 2.0;
        humidity += 5.0;
    } else if lat > 21.0 {
        temperature -= 2.0;
        humidity -= 5.0;
    }

    let humidity = humidity.clamp(30.0, 95.0);

    WeatherData {
        temperature,
        humidity,
        rainfall,
        wind_speed: 8.0,
        pressure: 1013.0,
        description: description.to_string(),
        icon: icon.to_string(),
        feels_like: temperature + 2.0,
        visibility: 10.0,
        source: DataSource::RegionalEstimate,
    }
}

/// Synthetic forecast built from the regional estimate
pub fn regional_forecast_estimate(
    lat: f64,
    lng: f64,
    start: NaiveDate,
    days: u32,
) -> WeatherForecast {
    use chrono::Datelike;

    let days = (0..clamp_forecast_days(days))
        .filter_map(|offset| start.checked_add_days(chrono::Days::new(offset as u64)))
        .map(|date| {
            let noon = regional_weather_estimate(lat, date.month(), 13);
            let night = regional_weather_estimate(lat, date.month(), 2);
            DailyForecast {
                date,
                temp_max: noon.temperature,
                temp_min: night.temperature,
                precipitation_mm: noon.rainfall,
                description: noon.description,
            }
        })
        .collect();

    WeatherForecast {
        latitude: lat,
        longitude: lng,
        days,
        source: DataSource::RegionalEstimate,
    }
}

/// Weather used when a coordinate query could not be resolved at all
pub fn default_weather() -> WeatherData {
    WeatherData {
        temperature: 28.0,
        humidity: 65.0,
        rainfall: 0.0,
        wind_speed: 5.0,
        pressure: 1013.0,
        description: "Clear sky".to_string(),
        icon: "01d".to_string(),
        feels_like: 30.0,
        visibility: 10.0,
        source: DataSource::Default,
    }
}

/// Climate used when a coordinate query could not be resolved at all
pub fn default_climate() -> ClimateData {
    ClimateData {
        avg_temperature: 28.0,
        avg_rainfall: 800.0,
        avg_humidity: 65.0,
        climate: "Tropical".to_string(),
        season: Season::Summer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_season() {
        assert_eq!(classify_season(1), Season::Winter);
        assert_eq!(classify_season(3), Season::Summer);
        assert_eq!(classify_season(5), Season::Summer);
        assert_eq!(classify_season(6), Season::Monsoon);
        assert_eq!(classify_season(9), Season::Monsoon);
        assert_eq!(classify_season(10), Season::Winter);
        assert_eq!(classify_season(12), Season::Winter);
    }

    #[test]
    fn test_classify_climate_bands() {
        assert_eq!(classify_climate(28.6), "Subtropical");
        assert_eq!(classify_climate(19.0), "Tropical Monsoon");
        assert_eq!(classify_climate(13.0), "Tropical");
    }

    #[test]
    fn test_avg_rainfall() {
        assert_eq!(estimate_avg_rainfall(Season::Winter, 19.0), 1500.0);
        assert_eq!(estimate_avg_rainfall(Season::Monsoon, 21.0), 1200.0);
        assert_eq!(estimate_avg_rainfall(Season::Summer, 28.0), 800.0);
    }

    #[test]
    fn test_regional_estimate_adjustments() {
        // July afternoon in the far south: 26 + 3 + 2
        let w = regional_weather_estimate(12.97, 7, 14);
        assert_eq!(w.temperature, 31.0);
        assert_eq!(w.humidity, 90.0);

        // January night in Delhi: 22 - 5 - 2
        let w = regional_weather_estimate(28.61, 1, 2);
        assert_eq!(w.temperature, 15.0);
        assert_eq!(w.humidity, 50.0);
        assert_eq!(w.pressure, 1013.0);
    }

    #[test]
    fn test_regional_estimate_humidity_every_month() {
        for month in 1..=12 {
            for lat in [10.0, 19.0, 30.0] {
                let w = regional_weather_estimate(lat, month, 12);
                assert!((30.0..=95.0).contains(&w.humidity));
                assert_eq!(
                    w.description == "Monsoon showers",
                    classify_season(month) == Season::Monsoon
                );
            }
        }
        assert_eq!(Season::Winter.to_string(), "Winter");
    }

    #[test]
    fn test_regional_estimate_is_deterministic() {
        assert_eq!(
            regional_weather_estimate(19.7, 4, 9),
            regional_weather_estimate(19.7, 4, 9)
        );
    }

    #[test]
    fn test_forecast_estimate_length() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(regional_forecast_estimate(19.0, 72.8, start, 5).days.len(), 5);
        assert_eq!(regional_forecast_estimate(19.0, 72.8, start, 0).days.len(), 1);
        assert_eq!(regional_forecast_estimate(19.0, 72.8, start, 30).days.len(), 14);
    }

    #[test]
    fn test_weather_codes() {
        assert_eq!(describe_weather_code(0), "Clear sky");
        assert_eq!(describe_weather_code(63), "Rain");
        assert_eq!(describe_weather_code(96), "Thunderstorm");
        assert_eq!(describe_weather_code(1234), "Unknown");
    }

    #[test]
    fn test_climate_derive() {
        let climate = ClimateData::derive(&default_weather(), 22.0, 7);
        assert_eq!(climate.season, Season::Monsoon);
        assert_eq!(climate.avg_rainfall, 1200.0);
        assert_eq!(climate.climate, "Tropical Monsoon");
    }
}

//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for distance calculations
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// GPS coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to another point in kilometres (haversine)
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Label used when no address could be resolved for a point
    pub fn label(&self) -> String {
        format!("Coordinates: {:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message describing progress or a degradation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Where a piece of environmental data came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Live third-party provider
    Live,
    /// Preset values for a known city
    CityPreset,
    /// Regional estimate derived from latitude and season
    RegionalEstimate,
    /// Generic defaults used when nothing else is available
    Default,
    /// External prediction backend
    PredictionBackend,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Live => write!(f, "live"),
            DataSource::CityPreset => write!(f, "city_preset"),
            DataSource::RegionalEstimate => write!(f, "regional_estimate"),
            DataSource::Default => write!(f, "default"),
            DataSource::PredictionBackend => write!(f, "prediction_backend"),
        }
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_same_point_is_zero() {
        let pune = Coordinates::new(18.5204, 73.8567);
        assert!(pune.distance_km(&pune).abs() < 1e-9);
    }

    #[test]
    fn test_distance_mumbai_pune() {
        let mumbai = Coordinates::new(19.0760, 72.8777);
        let pune = Coordinates::new(18.5204, 73.8567);
        let d = mumbai.distance_km(&pune);
        // ~120 km as the crow flies
        assert!(d > 115.0 && d < 125.0, "got {}", d);
    }

    #[test]
    fn test_coordinate_label() {
        let c = Coordinates::new(19.69661, 72.76559);
        assert_eq!(c.label(), "Coordinates: 19.6966, 72.7656");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(-2.345, 1), -2.3);
    }
}

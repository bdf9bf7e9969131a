//! Location resolution models

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Coordinates;

/// Place used whenever GPS acquisition fails
pub const GPS_FALLBACK_LOCATION: &str = "Palghar, Maharashtra";

/// Budget for a browser GPS fix before it is reported as a timeout
pub const GPS_TIMEOUT_MS: u32 = 8000;

/// Coordinates used for the estimated placeholder (Mumbai)
pub const ESTIMATED_COORDINATES: Coordinates = Coordinates {
    lat: 19.0760,
    lng: 72.8777,
};

/// Structured postal address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Address {
    pub city: String,
    pub state: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    pub formatted_address: String,
}

/// Which link of the geocoding chain produced a result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GeocodeSource {
    Google,
    Nominatim,
    RegionalTable,
    Estimated,
}

impl std::fmt::Display for GeocodeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocodeSource::Google => write!(f, "Google"),
            GeocodeSource::Nominatim => write!(f, "Nominatim"),
            GeocodeSource::RegionalTable => write!(f, "Regional table"),
            GeocodeSource::Estimated => write!(f, "Estimated"),
        }
    }
}

/// A resolved place
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationResult {
    pub name: String,
    pub coordinates: Coordinates,
    pub address: Address,
    pub source: GeocodeSource,
}

/// Result of reverse geocoding a coordinate pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReverseGeocodingResult {
    pub name: String,
    pub address: Address,
    pub source: GeocodeSource,
}

struct RegionalEntry {
    key: &'static str,
    city: &'static str,
    district: &'static str,
    lat: f64,
    lng: f64,
    pincode: &'static str,
}

const MAHARASHTRA_CITIES: &[RegionalEntry] = &[
    RegionalEntry { key: "mumbai", city: "Mumbai", district: "Mumbai City", lat: 19.0760, lng: 72.8777, pincode: "400001" },
    RegionalEntry { key: "pune", city: "Pune", district: "Pune", lat: 18.5204, lng: 73.8567, pincode: "411001" },
    RegionalEntry { key: "nashik", city: "Nashik", district: "Nashik", lat: 19.9975, lng: 73.7898, pincode: "422001" },
    RegionalEntry { key: "aurangabad", city: "Aurangabad", district: "Aurangabad", lat: 19.8762, lng: 75.3433, pincode: "431001" },
    RegionalEntry { key: "solapur", city: "Solapur", district: "Solapur", lat: 17.6599, lng: 75.9064, pincode: "413001" },
    RegionalEntry { key: "nagpur", city: "Nagpur", district: "Nagpur", lat: 21.1458, lng: 79.0882, pincode: "440001" },
    RegionalEntry { key: "ahmednagar", city: "Ahmednagar", district: "Ahmednagar", lat: 19.0948, lng: 74.7480, pincode: "414001" },
    RegionalEntry { key: "kolhapur", city: "Kolhapur", district: "Kolhapur", lat: 16.7050, lng: 74.2433, pincode: "416001" },
    RegionalEntry { key: "sangli", city: "Sangli", district: "Sangli", lat: 16.8524, lng: 74.5815, pincode: "416416" },
    RegionalEntry { key: "palghar", city: "Palghar", district: "Palghar", lat: 19.6966, lng: 72.7656, pincode: "401404" },
    RegionalEntry { key: "satara", city: "Satara", district: "Satara", lat: 17.6868, lng: 74.0178, pincode: "415001" },
];

impl RegionalEntry {
    fn to_result(&self) -> LocationResult {
        let name = format!("{}, Maharashtra, India", self.city);
        LocationResult {
            name: name.clone(),
            coordinates: Coordinates::new(self.lat, self.lng),
            address: Address {
                city: self.city.to_string(),
                state: "Maharashtra".to_string(),
                country: "India".to_string(),
                district: Some(self.district.to_string()),
                pincode: Some(self.pincode.to_string()),
                formatted_address: name,
            },
            source: GeocodeSource::RegionalTable,
        }
    }
}

/// Look up a place in the built-in Maharashtra table.
///
/// Exact key match wins; otherwise the first entry where either string
/// contains the other is used.
pub fn regional_location(query: &str) -> Option<LocationResult> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return None;
    }

    if let Some(entry) = MAHARASHTRA_CITIES.iter().find(|e| e.key == term) {
        return Some(entry.to_result());
    }

    MAHARASHTRA_CITIES
        .iter()
        .find(|e| e.key.contains(term.as_str()) || term.contains(e.key))
        .map(RegionalEntry::to_result)
}

/// Last link of the chain: echo the input with placeholder coordinates
pub fn estimated_location(query: &str) -> LocationResult {
    let query = query.trim();
    let name = format!("{}, Maharashtra, India (estimated)", query);
    LocationResult {
        name: name.clone(),
        coordinates: ESTIMATED_COORDINATES,
        address: Address {
            city: query.to_string(),
            state: "Maharashtra".to_string(),
            country: "India".to_string(),
            district: Some("Unknown".to_string()),
            pincode: Some("Unknown".to_string()),
            formatted_address: name,
        },
        source: GeocodeSource::Estimated,
    }
}

/// Number of entries in the regional table
pub fn regional_table_len() -> usize {
    MAHARASHTRA_CITIES.len()
}

// ============================================================================
// GPS acquisition outcomes
// ============================================================================

/// Why a browser GPS fix could not be obtained
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum GpsError {
    #[error("Location access denied by user. Please allow location access in your browser settings.")]
    PermissionDenied,

    #[error("Location information is unavailable. Please check your internet connection.")]
    PositionUnavailable,

    #[error("Location request timed out. Please try again.")]
    Timeout,

    #[error("Geolocation is not supported by this browser")]
    Unsupported,

    #[error("{0}")]
    Other(String),
}

impl GpsError {
    /// Short headline shown to the user
    pub fn headline(&self) -> &'static str {
        match self {
            GpsError::PermissionDenied => "🚫 Location access denied",
            GpsError::PositionUnavailable => "📍 Location unavailable",
            GpsError::Timeout => "⏰ GPS timeout",
            GpsError::Unsupported => "🚫 GPS not supported",
            GpsError::Other(_) => "❌ GPS error",
        }
    }

    /// Guidance following the headline
    pub fn help_text(&self) -> String {
        match self {
            GpsError::PermissionDenied => "Please click the location icon in your browser address bar and allow location access, then try again.".to_string(),
            GpsError::PositionUnavailable => "GPS service is not available. Using regional fallback.".to_string(),
            GpsError::Timeout => "Location request took too long. Using regional fallback.".to_string(),
            GpsError::Unsupported => "Your browser does not support location services.".to_string(),
            GpsError::Other(message) => message.clone(),
        }
    }

    /// Full notice text, always ending with the automatic fallback
    pub fn fallback_notice(&self) -> String {
        self.fallback_notice_for(GPS_FALLBACK_LOCATION)
    }

    /// Notice text naming a configured fallback location
    pub fn fallback_notice_for(&self, location: &str) -> String {
        format!(
            "{}\n{}\n\n✅ Auto-switched to {}",
            self.headline(),
            self.help_text(),
            location
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regional_exact_match() {
        let nashik = regional_location("Nashik").unwrap();
        assert_eq!(nashik.name, "Nashik, Maharashtra, India");
        assert_eq!(nashik.coordinates, Coordinates::new(19.9975, 73.7898));
        assert_eq!(nashik.address.pincode.as_deref(), Some("422001"));
        assert_eq!(nashik.source, GeocodeSource::RegionalTable);
    }

    #[test]
    fn test_regional_partial_match() {
        let palghar = regional_location("Palghar, Maharashtra").unwrap();
        assert_eq!(palghar.address.city, "Palghar");

        let mumbai = regional_location("mum").unwrap();
        assert_eq!(mumbai.address.district.as_deref(), Some("Mumbai City"));
    }

    #[test]
    fn test_regional_miss() {
        assert!(regional_location("Timbuktu").is_none());
        assert!(regional_location("   ").is_none());
    }

    #[test]
    fn test_regional_table_has_eleven_cities() {
        assert_eq!(regional_table_len(), 11);
    }

    #[test]
    fn test_estimated_location_echoes_input() {
        let est = estimated_location(" Wardha ");
        assert_eq!(est.name, "Wardha, Maharashtra, India (estimated)");
        assert_eq!(est.coordinates, ESTIMATED_COORDINATES);
        assert_eq!(est.address.district.as_deref(), Some("Unknown"));
        assert_eq!(est.source, GeocodeSource::Estimated);
    }

    #[test]
    fn test_gps_messages_are_distinct() {
        let kinds = [
            GpsError::PermissionDenied,
            GpsError::PositionUnavailable,
            GpsError::Timeout,
            GpsError::Unsupported,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in kinds.iter().skip(i + 1) {
                assert_ne!(a.to_string(), b.to_string());
                assert_ne!(a.fallback_notice(), b.fallback_notice());
            }
        }
    }

    #[test]
    fn test_gps_notice_always_names_palghar() {
        for err in [
            GpsError::PermissionDenied,
            GpsError::Timeout,
            GpsError::Unsupported,
            GpsError::Other("boom".into()),
        ] {
            assert!(err
                .fallback_notice()
                .ends_with("Auto-switched to Palghar, Maharashtra"));
        }
    }

    #[test]
    fn test_gps_error_wire_format() {
        let json = serde_json::to_string(&GpsError::Timeout).unwrap();
        assert_eq!(json, r#"{"kind":"timeout"}"#);
        let parsed: GpsError =
            serde_json::from_str(r#"{"kind":"other","message":"chip failure"}"#).unwrap();
        assert_eq!(parsed, GpsError::Other("chip failure".into()));
    }
}

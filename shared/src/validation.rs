//! Validation utilities for CropAI requests
//!
//! These run both server-side and in the browser (via WASM) so the same
//! message reaches the farmer regardless of where the input was checked.

use crate::models::MAX_FORECAST_DAYS;
use crate::types::Coordinates;

/// Shown when a recommendation is requested without any location
pub const MISSING_LOCATION_MESSAGE: &str = "Please provide your location to get crop recommendations";

/// Longest accepted free-text place name
pub const MAX_PLACE_NAME_LEN: usize = 200;

// ============================================================================
// Location Validations
// ============================================================================

/// Validate a free-text place name (non-empty after trimming)
pub fn validate_place_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(MISSING_LOCATION_MESSAGE);
    }
    if trimmed.chars().count() > MAX_PLACE_NAME_LEN {
        return Err("Location name is too long");
    }
    Ok(())
}

/// Validate latitude is within -90..=90
pub fn validate_latitude(lat: f64) -> Result<(), &'static str> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err("Latitude must be between -90 and 90");
    }
    Ok(())
}

/// Validate longitude is within -180..=180
pub fn validate_longitude(lng: f64) -> Result<(), &'static str> {
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

pub fn validate_coordinates(coords: &Coordinates) -> Result<(), &'static str> {
    validate_latitude(coords.lat)?;
    validate_longitude(coords.lng)
}

// ============================================================================
// Environmental Validations
// ============================================================================

/// Validate soil pH is on the 0-14 scale
pub fn validate_ph(ph: f64) -> Result<(), &'static str> {
    if !ph.is_finite() || !(0.0..=14.0).contains(&ph) {
        return Err("Soil pH must be between 0 and 14");
    }
    Ok(())
}

/// Validate a nutrient reading in kg/ha
pub fn validate_nutrient(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() || value < 0.0 {
        return Err("Nutrient values cannot be negative");
    }
    Ok(())
}

pub fn validate_forecast_days(days: u32) -> Result<(), &'static str> {
    if days == 0 || days > MAX_FORECAST_DAYS {
        return Err("Forecast days must be between 1 and 14");
    }
    Ok(())
}

// ============================================================================
// Market Validations
// ============================================================================

/// Parse a comma-separated commodity list, dropping blanks
pub fn parse_commodity_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Validate an alert threshold percentage
pub fn validate_alert_threshold(threshold: f64) -> Result<(), &'static str> {
    if !threshold.is_finite() || threshold <= 0.0 || threshold > 100.0 {
        return Err("Alert threshold must be between 0 and 100 percent");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Location Validations
    // ========================================================================

    #[test]
    fn test_validate_place_name_valid() {
        assert!(validate_place_name("Nashik").is_ok());
        assert!(validate_place_name("  Pune, Maharashtra ").is_ok());
    }

    #[test]
    fn test_validate_place_name_empty() {
        assert_eq!(validate_place_name(""), Err(MISSING_LOCATION_MESSAGE));
        assert_eq!(validate_place_name("   "), Err(MISSING_LOCATION_MESSAGE));
    }

    #[test]
    fn test_validate_place_name_too_long() {
        let name = "a".repeat(MAX_PLACE_NAME_LEN + 1);
        assert!(validate_place_name(&name).is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(&Coordinates::new(19.99, 73.79)).is_ok());
        assert!(validate_coordinates(&Coordinates::new(90.0, -180.0)).is_ok());
        assert!(validate_coordinates(&Coordinates::new(90.1, 0.0)).is_err());
        assert!(validate_coordinates(&Coordinates::new(0.0, 180.5)).is_err());
        assert!(validate_coordinates(&Coordinates::new(f64::NAN, 0.0)).is_err());
    }

    // ========================================================================
    // Environmental Validations
    // ========================================================================

    #[test]
    fn test_validate_ph() {
        assert!(validate_ph(6.5).is_ok());
        assert!(validate_ph(0.0).is_ok());
        assert!(validate_ph(14.0).is_ok());
        assert!(validate_ph(-0.1).is_err());
        assert!(validate_ph(14.1).is_err());
    }

    #[test]
    fn test_validate_nutrient() {
        assert!(validate_nutrient(0.0).is_ok());
        assert!(validate_nutrient(180.0).is_ok());
        assert!(validate_nutrient(-1.0).is_err());
    }

    #[test]
    fn test_validate_forecast_days() {
        assert!(validate_forecast_days(1).is_ok());
        assert!(validate_forecast_days(14).is_ok());
        assert!(validate_forecast_days(0).is_err());
        assert!(validate_forecast_days(15).is_err());
    }

    // ========================================================================
    // Market Validations
    // ========================================================================

    #[test]
    fn test_parse_commodity_list() {
        assert_eq!(
            parse_commodity_list("Rice, Wheat,,  Onion "),
            vec!["Rice", "Wheat", "Onion"]
        );
        assert!(parse_commodity_list(" , ").is_empty());
    }

    #[test]
    fn test_validate_alert_threshold() {
        assert!(validate_alert_threshold(5.0).is_ok());
        assert!(validate_alert_threshold(0.0).is_err());
        assert!(validate_alert_threshold(150.0).is_err());
    }
}

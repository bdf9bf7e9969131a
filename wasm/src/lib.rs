//! WebAssembly module for the CropAI advisory client
//!
//! Provides client-side computation for:
//! - Location-name crop scoring
//! - Soil texture and fertility classification
//! - Season lookup
//! - GPS failure messaging and input validation
//! - Distances between points

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Ranked, enriched recommendations for a location name as JSON
#[wasm_bindgen]
pub fn recommend_crops(location_name: &str) -> Result<String, JsValue> {
    let recommendations = recommend_for_location(location_name);
    serde_json::to_string(&recommendations)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Catalog entry for a crop display name as JSON
#[wasm_bindgen]
pub fn crop_details(crop: &str) -> Result<String, JsValue> {
    serde_json::to_string(&crop_profile(crop))
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Classify fertility from N, P, K (kg/ha) and organic carbon (g/kg)
#[wasm_bindgen]
pub fn classify_fertility(nitrogen: f64, phosphorus: f64, potassium: f64, organic_carbon: f64) -> String {
    assess_fertility(nitrogen, phosphorus, potassium, organic_carbon).to_string()
}

/// Texture class from clay, sand and silt percentages
#[wasm_bindgen]
pub fn classify_soil_texture(clay: f64, sand: f64, silt: f64) -> String {
    determine_soil_texture(clay, sand, silt).to_string()
}

/// Season for a calendar month (1-12)
#[wasm_bindgen]
pub fn season_for_month(month: u32) -> String {
    classify_season(month).to_string()
}

/// Match soil JSON against a crop's requirements
#[wasm_bindgen]
pub fn crop_suitability(soil_json: &str, crop: &str) -> Result<String, JsValue> {
    let soil: SoilData = serde_json::from_str(soil_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid soil JSON: {}", e)))?;

    serde_json::to_string(&assess_crop_suitability(&soil, crop))
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// User-facing notice for a failed GPS fix, e.g. `{"kind":"timeout"}`
#[wasm_bindgen]
pub fn gps_failure_notice(error_json: &str) -> Result<String, JsValue> {
    let error: GpsError = serde_json::from_str(error_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid GPS error JSON: {}", e)))?;
    Ok(error.fallback_notice())
}

/// Budget for `navigator.geolocation.getCurrentPosition`
#[wasm_bindgen]
pub fn gps_timeout_ms() -> u32 {
    GPS_TIMEOUT_MS
}

#[wasm_bindgen]
pub fn gps_fallback_location() -> String {
    GPS_FALLBACK_LOCATION.to_string()
}

/// Check a place name before submitting; returns the error message or empty
#[wasm_bindgen]
pub fn check_location_input(name: &str) -> String {
    match validate_place_name(name) {
        Ok(()) => String::new(),
        Err(message) => message.to_string(),
    }
}

/// Validate coordinates from a GPS fix
#[wasm_bindgen]
pub fn validate_gps_fix(latitude: f64, longitude: f64) -> bool {
    validate_coordinates(&Coordinates::new(latitude, longitude)).is_ok()
}

/// Great-circle distance in kilometres between two points
#[wasm_bindgen]
pub fn distance_between(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    Coordinates::new(lat1, lng1).distance_km(&Coordinates::new(lat2, lng2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        init();
        init();
    }

    #[test]
    fn test_recommend_crops_json() {
        let json = recommend_crops("Nashik").unwrap();
        let recs: Vec<CropRecommendation> = serde_json::from_str(&json).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].name, "Onion");
        assert_eq!(recs[0].confidence, 95);
    }

    #[test]
    fn test_classifiers() {
        assert_eq!(classify_fertility(350.0, 35.0, 250.0, 25.0), "High");
        assert_eq!(classify_soil_texture(45.0, 30.0, 25.0), "Clay");
        assert_eq!(season_for_month(7), "Monsoon");
        assert_eq!(season_for_month(12), "Winter");
    }

    #[test]
    fn test_gps_helpers() {
        assert_eq!(gps_timeout_ms(), 8000);
        let notice = gps_failure_notice(r#"{"kind":"permission_denied"}"#).unwrap();
        assert!(notice.starts_with("🚫 Location access denied"));
        assert!(notice.ends_with(&gps_fallback_location()));
        assert!(validate_gps_fix(19.69, 72.76));
        assert!(!validate_gps_fix(95.0, 72.76));
    }

    #[test]
    fn test_distance_between_palghar_and_nashik() {
        let km = distance_between(19.6966, 72.7656, 19.9975, 73.7898);
        assert!((105.0..120.0).contains(&km), "got {}", km);
        assert_eq!(distance_between(19.0, 73.0, 19.0, 73.0), 0.0);
    }

    #[test]
    fn test_location_input() {
        assert_eq!(check_location_input("Pune"), "");
        assert_eq!(check_location_input("  "), MISSING_LOCATION_MESSAGE);
    }

    #[test]
    fn test_crop_suitability_json() {
        let soil = serde_json::to_string(&SoilData::generic_default()).unwrap();
        let result: CropSuitability =
            serde_json::from_str(&crop_suitability(&soil, "rice").unwrap()).unwrap();
        assert_eq!(result.score, 75);
    }
}

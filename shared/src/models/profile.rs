//! Location environmental profile and built-in city presets

use serde::{Deserialize, Serialize};

use super::market::MarketPrice;
use super::prediction::BackendAnalysis;
use super::soil::{Fertility, SoilData};
use super::weather::{default_climate, default_weather, ClimateData, WeatherData};
use crate::types::{Coordinates, DataSource};
use crate::validation::{validate_nutrient, validate_ph};

/// Everything known about a place for one recommendation request.
///
/// Built from scratch per request and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationProfile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_address: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub weather: WeatherData,
    pub climate: ClimateData,
    pub soil: SoilData,
    pub market_prices: Vec<MarketPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendAnalysis>,
}

/// Maximum market quotes carried in a profile
pub const PROFILE_MARKET_LIMIT: usize = 10;

impl LocationProfile {
    /// Profile for a coordinate query whose address could not be resolved
    pub fn minimal(coords: Coordinates) -> Self {
        Self {
            name: coords.label(),
            resolved_address: None,
            coordinates: Some(coords),
            weather: default_weather(),
            climate: default_climate(),
            soil: SoilData::generic_default(),
            market_prices: Vec::new(),
            backend: None,
        }
    }

    /// Overwrite soil nutrients with values measured by the prediction backend
    pub fn apply_backend(&mut self, analysis: BackendAnalysis) {
        let soil = &analysis.soil_data;
        // Readings outside physical bounds keep the aggregated value
        for (target, value) in [
            (&mut self.soil.nitrogen, soil.n),
            (&mut self.soil.phosphorus, soil.p),
            (&mut self.soil.potassium, soil.k),
        ] {
            if validate_nutrient(value).is_ok() {
                *target = value;
            }
        }
        if validate_ph(soil.ph).is_ok() {
            self.soil.ph = soil.ph;
        }
        self.soil.source = DataSource::PredictionBackend;
        self.backend = Some(analysis);
    }
}

// ============================================================================
// City presets
// ============================================================================

/// Soil and (optionally) weather known in advance for a city
#[derive(Debug, Clone, PartialEq)]
pub struct CityPreset {
    pub coordinates: Coordinates,
    pub soil: SoilData,
    pub weather: Option<WeatherData>,
}

struct PresetRow {
    keys: &'static [&'static str],
    lat: f64,
    lng: f64,
    soil_type: &'static str,
    soil_class: Option<&'static str>,
    ph: f64,
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
    organic: f64,
    fertility: Fertility,
    /// temperature, humidity, rainfall, wind, pressure, description, feels like, visibility
    weather: Option<(f64, f64, f64, f64, f64, &'static str, f64, f64)>,
}

const CITY_PRESETS: &[PresetRow] = &[
    PresetRow { keys: &["mumbai"], lat: 19.0760, lng: 72.8777, soil_type: "Black Soil", soil_class: Some("Clay"), ph: 8.2, nitrogen: 220.0, phosphorus: 42.0, potassium: 200.0, organic: 3.8, fertility: Fertility::High, weather: Some((32.0, 78.0, 8.0, 12.0, 1011.0, "Humid and warm", 36.0, 8.0)) },
    PresetRow { keys: &["nashik"], lat: 19.9975, lng: 73.7898, soil_type: "Black Soil", soil_class: Some("Clay Loam"), ph: 7.5, nitrogen: 240.0, phosphorus: 35.0, potassium: 185.0, organic: 2.5, fertility: Fertility::Medium, weather: Some((25.0, 58.0, 1.0, 8.0, 1015.0, "Pleasant and dry", 27.0, 15.0)) },
    PresetRow { keys: &["pune"], lat: 18.5204, lng: 73.8567, soil_type: "Red Laterite", soil_class: None, ph: 6.8, nitrogen: 210.0, phosphorus: 32.0, potassium: 175.0, organic: 3.1, fertility: Fertility::Medium, weather: Some((26.0, 62.0, 3.0, 9.0, 1014.0, "Moderate climate", 28.0, 12.0)) },
    PresetRow { keys: &["nagpur"], lat: 21.1458, lng: 79.0882, soil_type: "Black Cotton", soil_class: None, ph: 7.8, nitrogen: 195.0, phosphorus: 25.0, potassium: 165.0, organic: 2.9, fertility: Fertility::Medium, weather: None },
    PresetRow { keys: &["kolhapur"], lat: 16.7050, lng: 74.2433, soil_type: "Alluvial", soil_class: None, ph: 6.9, nitrogen: 235.0, phosphorus: 38.0, potassium: 195.0, organic: 3.5, fertility: Fertility::High, weather: None },
    PresetRow { keys: &["delhi"], lat: 28.6139, lng: 77.2090, soil_type: "Alluvial", soil_class: None, ph: 7.2, nitrogen: 260.0, phosphorus: 40.0, potassium: 180.0, organic: 3.2, fertility: Fertility::High, weather: Some((30.0, 60.0, 1.0, 8.0, 1012.0, "Clear and warm", 34.0, 15.0)) },
    PresetRow { keys: &["bangalore", "bengaluru"], lat: 12.9716, lng: 77.5946, soil_type: "Red Soil", soil_class: None, ph: 6.4, nitrogen: 200.0, phosphorus: 30.0, potassium: 170.0, organic: 2.8, fertility: Fertility::Medium, weather: Some((24.0, 70.0, 4.0, 6.0, 1016.0, "Pleasant weather", 26.0, 18.0)) },
    PresetRow { keys: &["hyderabad"], lat: 17.3850, lng: 78.4867, soil_type: "Black Soil", soil_class: None, ph: 7.6, nitrogen: 220.0, phosphorus: 32.0, potassium: 175.0, organic: 3.0, fertility: Fertility::Medium, weather: None },
    PresetRow { keys: &["chennai"], lat: 13.0827, lng: 80.2707, soil_type: "Sandy Loam", soil_class: None, ph: 6.8, nitrogen: 190.0, phosphorus: 28.0, potassium: 155.0, organic: 2.6, fertility: Fertility::Medium, weather: None },
];

impl PresetRow {
    fn to_preset(&self) -> CityPreset {
        CityPreset {
            coordinates: Coordinates::new(self.lat, self.lng),
            soil: SoilData {
                soil_type: self.soil_type.to_string(),
                ph: self.ph,
                nitrogen: self.nitrogen,
                phosphorus: self.phosphorus,
                potassium: self.potassium,
                organic_carbon: Some(self.organic),
                soil_class: self.soil_class.map(String::from),
                drainage: None,
                fertility: self.fertility,
                recommendations: Vec::new(),
                source: DataSource::CityPreset,
            },
            weather: self.weather.map(
                |(temperature, humidity, rainfall, wind_speed, pressure, description, feels_like, visibility)| {
                    WeatherData {
                        temperature,
                        humidity,
                        rainfall,
                        wind_speed,
                        pressure,
                        description: description.to_string(),
                        icon: "02d".to_string(),
                        feels_like,
                        visibility,
                        source: DataSource::CityPreset,
                    }
                },
            ),
        }
    }
}

/// Preset for the first city whose key occurs in the place name
pub fn city_preset(place_name: &str) -> Option<CityPreset> {
    let name = place_name.to_lowercase();
    CITY_PRESETS
        .iter()
        .find(|row| row.keys.iter().any(|k| name.contains(k)))
        .map(PresetRow::to_preset)
}

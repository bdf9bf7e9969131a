//! Environmental aggregation
//!
//! Weather, climate, soil and nearby market prices are fetched concurrently
//! for a coordinate. Each source falls back on its own, so aggregation
//! always yields a usable profile once a coordinate is known.

use chrono::Datelike;
use shared::{
    city_preset, default_climate, default_weather, ClimateData, Coordinates, DataSource,
    LocationProfile, MarketPrice, Notice, SoilData, WeatherData, PROFILE_MARKET_LIMIT,
};

use super::market::MarketService;
use super::soil::SoilService;
use super::weather::{india_now, WeatherService};

/// Raw environmental readings for one coordinate
#[derive(Debug, Clone)]
pub struct Environment {
    pub coordinates: Coordinates,
    pub weather: WeatherData,
    pub climate: ClimateData,
    pub soil: SoilData,
    pub market_prices: Vec<MarketPrice>,
}

/// Environmental aggregation service
#[derive(Clone)]
pub struct EnvironmentService {
    weather: WeatherService,
    soil: SoilService,
    market: MarketService,
}

impl EnvironmentService {
    /// Create a new EnvironmentService instance
    pub fn new(weather: WeatherService, soil: SoilService, market: MarketService) -> Self {
        Self {
            weather,
            soil,
            market,
        }
    }

    /// Fetch every environmental source for a coordinate concurrently
    pub async fn gather(&self, coords: Coordinates) -> Environment {
        let ((weather, climate), soil, market_prices) = tokio::join!(
            self.weather.weather_and_climate(coords.lat, coords.lng),
            self.soil.soil_data(coords.lat, coords.lng),
            self.market.nearby(&coords, PROFILE_MARKET_LIMIT),
        );

        tracing::debug!(
            "Environment for ({}, {}): weather={}, soil={}, {} market quotes",
            coords.lat,
            coords.lng,
            weather.source,
            soil.source,
            market_prices.len()
        );

        Environment {
            coordinates: coords,
            weather,
            climate,
            soil,
            market_prices,
        }
    }
}

impl Environment {
    /// Replace regional estimates with a city's known values
    fn apply_city_preset(&mut self, place_name: &str) {
        let Some(preset) = city_preset(place_name) else {
            return;
        };

        if self.soil.source == DataSource::RegionalEstimate {
            self.soil = preset.soil;
        }
        if self.weather.source == DataSource::RegionalEstimate {
            if let Some(weather) = preset.weather {
                self.climate =
                    ClimateData::derive(&weather, self.coordinates.lat, india_now().month());
                self.weather = weather;
            }
        }
    }

    /// Degradation notices for sources that fell back
    fn notices(&self) -> Vec<Notice> {
        let mut notices = Vec::new();
        if self.weather.source == DataSource::RegionalEstimate {
            notices.push(Notice::warning(
                "Live weather unavailable - using regional weather estimates",
            ));
        }
        if self.soil.source == DataSource::RegionalEstimate {
            notices.push(Notice::warning(
                "Soil analysis unavailable - using regional soil estimates",
            ));
        }
        notices
    }

    /// Profile for a place-name query.
    ///
    /// The user's input stays the profile name; the geocoded address is kept
    /// alongside it.
    pub fn into_place_profile(
        mut self,
        place_name: &str,
        resolved_address: String,
    ) -> (LocationProfile, Vec<Notice>) {
        self.apply_city_preset(place_name);
        let mut notices = self.notices();
        notices.push(Notice::success(format!(
            "Location data loaded for {}! Auto-generating crop recommendations...",
            place_name
        )));

        let profile = LocationProfile {
            name: place_name.to_string(),
            resolved_address: Some(resolved_address),
            coordinates: Some(self.coordinates),
            weather: self.weather,
            climate: self.climate,
            soil: self.soil,
            market_prices: self.market_prices,
            backend: None,
        };
        (profile, notices)
    }

    /// Profile for a coordinate query whose address was resolved
    pub fn into_coordinate_profile(self, address: String) -> (LocationProfile, Vec<Notice>) {
        let mut notices = self.notices();
        notices.push(Notice::success(
            "GPS location data loaded! Auto-generating recommendations...",
        ));

        let profile = LocationProfile {
            name: address.clone(),
            resolved_address: Some(address),
            coordinates: Some(self.coordinates),
            weather: self.weather,
            climate: self.climate,
            soil: self.soil,
            market_prices: self.market_prices,
            backend: None,
        };
        (profile, notices)
    }
}

/// Profile for a place that could not be located at all.
///
/// Uses the city preset when the name matches one, otherwise generic defaults.
pub fn unresolved_place_profile(place_name: &str) -> LocationProfile {
    match city_preset(place_name) {
        Some(preset) => {
            let weather = preset.weather.unwrap_or_else(default_weather);
            let climate =
                ClimateData::derive(&weather, preset.coordinates.lat, india_now().month());
            LocationProfile {
                name: place_name.to_string(),
                resolved_address: None,
                coordinates: Some(preset.coordinates),
                weather,
                climate,
                soil: preset.soil,
                market_prices: Vec::new(),
                backend: None,
            }
        }
        None => LocationProfile {
            name: place_name.to_string(),
            resolved_address: None,
            coordinates: None,
            weather: default_weather(),
            climate: default_climate(),
            soil: SoilData::generic_default(),
            market_prices: Vec::new(),
            backend: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::regional_weather_estimate;

    fn estimated_environment(lat: f64, lng: f64) -> Environment {
        let weather = regional_weather_estimate(lat, 1, 12);
        Environment {
            coordinates: Coordinates::new(lat, lng),
            climate: ClimateData::derive(&weather, lat, 1),
            weather,
            soil: SoilData::regional_estimate(lat),
            market_prices: Vec::new(),
        }
    }

    #[test]
    fn test_city_preset_replaces_estimates() {
        let env = estimated_environment(19.9975, 73.7898);
        let (profile, notices) = env.into_place_profile("Nashik", "Nashik, Maharashtra".into());

        assert_eq!(profile.name, "Nashik");
        assert_eq!(profile.soil.ph, 7.5);
        assert_eq!(profile.soil.source, DataSource::CityPreset);
        assert_eq!(profile.weather.description, "Pleasant and dry");
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, shared::NoticeLevel::Success);
    }

    #[test]
    fn test_live_soil_is_kept_over_preset() {
        let mut env = estimated_environment(19.9975, 73.7898);
        env.soil.source = DataSource::Live;
        env.soil.ph = 7.1;
        let (profile, _) = env.into_place_profile("Nashik", "Nashik".into());
        assert_eq!(profile.soil.ph, 7.1);
    }

    #[test]
    fn test_estimates_without_preset_emit_warnings() {
        let env = estimated_environment(25.0, 80.0);
        let (profile, notices) = env.into_coordinate_profile("Prayagraj, Uttar Pradesh".into());
        assert_eq!(profile.name, "Prayagraj, Uttar Pradesh");
        assert_eq!(profile.soil.soil_type, "Black Soil (Regur)");
        assert_eq!(notices.len(), 3);
    }

    #[test]
    fn test_unresolved_place_uses_generic_defaults() {
        let profile = unresolved_place_profile("Atlantis");
        assert_eq!(profile.soil.ph, 6.5);
        assert_eq!(profile.soil.nitrogen, 180.0);
        assert_eq!(profile.soil.phosphorus, 25.0);
        assert_eq!(profile.soil.potassium, 150.0);
        assert!(profile.coordinates.is_none());
    }

    #[test]
    fn test_unresolved_place_uses_preset() {
        let profile = unresolved_place_profile("Chennai");
        assert_eq!(profile.soil.soil_type, "Sandy Loam");
        assert_eq!(profile.weather.temperature, 28.0);
        assert!(profile.coordinates.is_some());
    }
}

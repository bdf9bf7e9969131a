//! Configuration management for the CropAI advisory service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROPAI_ prefix
//!
//! A missing third-party API key is not an error: the corresponding
//! provider is skipped and its regional fallback is used instead.

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// External crop prediction backend
    pub prediction_backend: PredictionBackendConfig,

    /// Geocoding providers
    pub geocoding: GeocodingConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Soil grid API configuration
    pub soil: SoilConfig,

    /// Government commodity price API configuration
    pub market: MarketConfig,

    /// Browser GPS acquisition settings
    pub gps: GpsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PredictionBackendConfig {
    /// Whether the backend-assisted path is attempted at all
    pub enabled: bool,

    /// Base URL of the prediction service
    pub base_url: String,

    /// Budget for soil-data and predict calls in milliseconds
    pub timeout_ms: u64,

    /// Budget for the health probe in milliseconds
    pub health_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Google Geocoding API key
    pub google_api_key: Option<String>,

    /// Google Geocoding endpoint
    pub google_base_url: String,

    /// Nominatim base URL
    pub nominatim_url: String,

    /// User-Agent sent to Nominatim (required by its usage policy)
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,

    /// OpenWeatherMap API endpoint
    pub base_url: String,

    /// Open-Meteo forecast endpoint
    pub forecast_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SoilConfig {
    /// SoilGrids properties endpoint
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarketConfig {
    /// data.gov.in API key
    pub api_key: Option<String>,

    /// data.gov.in resource endpoint
    pub base_url: String,

    /// Commodity price resource identifier
    pub resource_id: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GpsConfig {
    /// Browser GPS acquisition budget in milliseconds
    pub timeout_ms: u32,

    /// Place used whenever a GPS fix cannot be obtained
    pub fallback_location: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROPAI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("prediction_backend.enabled", true)?
            .set_default("prediction_backend.base_url", DEFAULT_PREDICTION_URL)?
            .set_default("prediction_backend.timeout_ms", 15_000)?
            .set_default("prediction_backend.health_timeout_ms", 5_000)?
            .set_default("geocoding.google_base_url", DEFAULT_GOOGLE_GEOCODE_URL)?
            .set_default("geocoding.nominatim_url", DEFAULT_NOMINATIM_URL)?
            .set_default("geocoding.user_agent", DEFAULT_USER_AGENT)?
            .set_default("weather.base_url", DEFAULT_WEATHER_URL)?
            .set_default("weather.forecast_url", DEFAULT_FORECAST_URL)?
            .set_default("soil.base_url", DEFAULT_SOIL_URL)?
            .set_default("market.base_url", DEFAULT_MARKET_URL)?
            .set_default("market.resource_id", DEFAULT_MARKET_RESOURCE)?
            .set_default("gps.timeout_ms", i64::from(shared::GPS_TIMEOUT_MS))?
            .set_default("gps.fallback_location", shared::GPS_FALLBACK_LOCATION)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROPAI_ prefix)
            .add_source(
                Environment::with_prefix("CROPAI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

const DEFAULT_PREDICTION_URL: &str = "http://localhost:8000";
const DEFAULT_GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_USER_AGENT: &str = "CropAI-SmartFarming/1.0";
const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const DEFAULT_SOIL_URL: &str = "https://rest.isric.org/soilgrids/v2.0/properties/query";
const DEFAULT_MARKET_URL: &str = "https://api.data.gov.in/resource";
const DEFAULT_MARKET_RESOURCE: &str = "9ef84268-d588-465a-a308-a864a43d0070";

/// Treat blank keys the same as absent ones
pub fn configured_key(key: &Option<String>) -> Option<&str> {
    key.as_deref().map(str::trim).filter(|k| !k.is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            prediction_backend: PredictionBackendConfig::default(),
            geocoding: GeocodingConfig::default(),
            weather: WeatherConfig::default(),
            soil: SoilConfig::default(),
            market: MarketConfig::default(),
            gps: GpsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for PredictionBackendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_PREDICTION_URL.to_string(),
            timeout_ms: 15_000,
            health_timeout_ms: 5_000,
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            google_base_url: DEFAULT_GOOGLE_GEOCODE_URL.to_string(),
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_WEATHER_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

impl Default for SoilConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SOIL_URL.to_string(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_MARKET_URL.to_string(),
            resource_id: DEFAULT_MARKET_RESOURCE.to_string(),
        }
    }
}

impl Default for GpsConfig {
    fn default() -> Self {
        Self {
            timeout_ms: shared::GPS_TIMEOUT_MS,
            fallback_location: shared::GPS_FALLBACK_LOCATION.to_string(),
        }
    }
}

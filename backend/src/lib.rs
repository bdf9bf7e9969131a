//! CropAI Advisory - Backend Server
//!
//! Resolves a farmer's location, aggregates weather, soil and market data
//! for it, and returns ranked crop recommendations. Every third-party
//! provider has a deterministic fallback, so a recommendation request only
//! fails on invalid input.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use external::{GeocodingClient, MarketClient, PredictionClient, SoilGridsClient, WeatherClient};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub geocoding: GeocodingClient,
    pub weather: WeatherClient,
    pub soil: SoilGridsClient,
    pub market: MarketClient,
    pub prediction: PredictionClient,
}

impl AppState {
    /// Build one HTTP client per provider from configuration
    pub fn new(config: Config) -> Self {
        Self {
            geocoding: GeocodingClient::new(&config.geocoding),
            weather: WeatherClient::new(&config.weather),
            soil: SoilGridsClient::new(config.soil.base_url.clone()),
            market: MarketClient::new(&config.market),
            prediction: PredictionClient::new(&config.prediction_backend),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "CropAI Advisory API v1.0"
}

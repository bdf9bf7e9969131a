//! Route definitions for the CropAI advisory API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Crop recommendations
        .nest("/recommendations", recommendation_routes())
        // Location resolution
        .nest("/locations", location_routes())
        // Environmental data
        .nest("/weather", weather_routes())
        .nest("/soil", soil_routes())
        .nest("/market", market_routes())
        // Crop catalog
        .route("/crops/:name", get(handlers::get_crop))
        // Prediction backend pass-through
        .nest("/backend", backend_routes())
}

/// Recommendation routes
fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_recommendations))
        .route("/gps", post(handlers::create_gps_recommendations))
}

/// Location routes
fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/resolve", get(handlers::resolve_location))
        .route("/reverse", get(handlers::reverse_geocode))
        .route("/search", get(handlers::search_places))
        .route("/gps-settings", get(handlers::gps_settings))
}

/// Weather routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/current", get(handlers::current_weather))
        .route("/forecast", get(handlers::weather_forecast))
        .route("/climate", get(handlers::climate_summary))
}

/// Soil routes
fn soil_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::soil_analysis))
        .route("/suitability", get(handlers::crop_suitability))
}

/// Market price routes
fn market_routes() -> Router<AppState> {
    Router::new()
        .route("/prices", get(handlers::market_prices))
        .route("/nearby", get(handlers::nearby_prices))
        .route("/search", get(handlers::search_prices))
        .route("/alerts", get(handlers::price_alerts))
}

/// Prediction backend routes
fn backend_routes() -> Router<AppState> {
    Router::new()
        .route("/weather", get(handlers::backend_weather))
        .route("/market", get(handlers::backend_market))
}

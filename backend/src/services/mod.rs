//! Business logic services for the CropAI advisory platform

pub mod environment;
pub mod location;
pub mod market;
pub mod recommendation;
pub mod soil;
pub mod weather;

pub use environment::EnvironmentService;
pub use location::LocationService;
pub use market::MarketService;
pub use recommendation::RecommendationService;
pub use soil::SoilService;
pub use weather::WeatherService;

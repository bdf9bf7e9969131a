//! HTTP handlers for the CropAI advisory API

mod backend;
mod crops;
mod health;
mod location;
mod market;
mod recommendation;
mod soil;
mod weather;

pub use backend::*;
pub use crops::*;
pub use health::*;
pub use location::*;
pub use market::*;
pub use recommendation::*;
pub use soil::*;
pub use weather::*;

use serde::Deserialize;
use shared::{validate_coordinates, Coordinates};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// `?lat=&lng=` query parameters
#[derive(Debug, Deserialize, Validate)]
pub struct CoordinateQuery {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub lat: f64,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub lng: f64,
}

impl CoordinateQuery {
    /// Validated coordinate pair
    pub fn coordinates(&self) -> AppResult<Coordinates> {
        self.validate()?;
        let coords = Coordinates::new(self.lat, self.lng);
        validate_coordinates(&coords).map_err(|m| AppError::invalid("coordinates", m))?;
        Ok(coords)
    }
}

/// `?q=` free-text query parameter
#[derive(Debug, Deserialize)]
pub struct TextQuery {
    #[serde(default)]
    pub q: String,
}

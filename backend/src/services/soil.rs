//! Soil analysis service

use shared::{assess_crop_suitability, CropSuitability, SoilData};

use crate::external::SoilGridsClient;

/// Soil service
#[derive(Clone)]
pub struct SoilService {
    client: SoilGridsClient,
}

impl SoilService {
    /// Create a new SoilService instance
    pub fn new(client: SoilGridsClient) -> Self {
        Self { client }
    }

    /// Surface soil at a point, or the latitude-band estimate on failure
    pub async fn soil_data(&self, lat: f64, lng: f64) -> SoilData {
        match self.client.get_soil_data(lat, lng).await {
            Ok(soil) => soil,
            Err(e) => {
                tracing::warn!("Soil provider failed for ({}, {}): {}", lat, lng, e);
                SoilData::regional_estimate(lat)
            }
        }
    }

    /// How well the soil at a point suits a crop
    pub async fn crop_suitability(&self, lat: f64, lng: f64, crop: &str) -> CropSuitability {
        let soil = self.soil_data(lat, lng).await;
        assess_crop_suitability(&soil, crop)
    }
}

//! SoilGrids (ISRIC) client for surface soil properties

use reqwest::Client;
use serde::Deserialize;
use shared::{SoilData, SoilMeasurements};

use super::{http_client, read_json, request_failed, PROVIDER_TIMEOUT};
use crate::error::AppResult;

/// Properties requested from SoilGrids
const PROPERTIES: &[&str] = &[
    "phh2o", "nitrogen", "phosav", "potassium", "ocd", "clay", "sand", "silt",
];

/// Surface layer used for every reading
const SURFACE_DEPTH: &str = "0-5cm";

/// Potassium is reported in cmol(+)/kg
const POTASSIUM_FACTOR: f64 = 39.1;

/// Soil grid API client
#[derive(Clone)]
pub struct SoilGridsClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SoilGridsResponse {
    properties: SoilGridsProperties,
}

#[derive(Debug, Deserialize)]
struct SoilGridsProperties {
    #[serde(default)]
    layers: Vec<SoilGridsLayer>,
}

#[derive(Debug, Deserialize)]
struct SoilGridsLayer {
    name: String,
    #[serde(default)]
    depths: Vec<SoilGridsDepth>,
}

#[derive(Debug, Deserialize)]
struct SoilGridsDepth {
    label: String,
    values: SoilGridsValues,
}

#[derive(Debug, Deserialize)]
struct SoilGridsValues {
    mean: Option<f64>,
}

impl SoilGridsClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: http_client(PROVIDER_TIMEOUT),
            base_url,
        }
    }

    /// Fetch and analyse the surface layer at a point
    pub async fn get_soil_data(&self, latitude: f64, longitude: f64) -> AppResult<SoilData> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();
        let mut query: Vec<(&str, &str)> = vec![
            ("lon", lon.as_str()),
            ("lat", lat.as_str()),
            ("depth", SURFACE_DEPTH),
            ("value", "mean"),
        ];
        query.extend(PROPERTIES.iter().map(|p| ("property", *p)));

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| request_failed("SoilGrids", e))?;

        let data: SoilGridsResponse = read_json(response, "SoilGrids").await?;
        Ok(SoilData::from_measurements(measurements(&data), latitude))
    }
}

fn surface_mean(data: &SoilGridsResponse, name: &str) -> Option<f64> {
    data.properties
        .layers
        .iter()
        .find(|layer| layer.name == name)?
        .depths
        .iter()
        .find(|depth| depth.label == SURFACE_DEPTH)?
        .values
        .mean
}

/// Convert SoilGrids mapped units into working units.
///
/// Layers absent from the response are left empty and take their defaults.
fn measurements(data: &SoilGridsResponse) -> SoilMeasurements {
    let tenth = |name: &str| surface_mean(data, name).map(|v| v / 10.0);

    SoilMeasurements {
        ph: tenth("phh2o"),
        nitrogen: surface_mean(data, "nitrogen"),
        phosphorus: surface_mean(data, "phosav"),
        potassium: surface_mean(data, "potassium").map(|v| v * POTASSIUM_FACTOR),
        organic_carbon: tenth("ocd"),
        clay: tenth("clay"),
        sand: tenth("sand"),
        silt: tenth("silt"),
    }
}

//! Wire contract of the external crop prediction backend

use serde::{Deserialize, Serialize};

use super::crop::{crop_profile, emoji_for_crop, CropRecommendation, Difficulty};

/// `GET /health` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// `POST /soil-data` body: a place name or a coordinate pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LocationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl LocationRequest {
    pub fn by_name(place_name: impl Into<String>) -> Self {
        Self {
            place_name: Some(place_name.into()),
            ..Default::default()
        }
    }

    pub fn by_coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            place_name: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }
}

/// `POST /soil-data` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilDataResponse {
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "K")]
    pub k: f64,
    pub ph: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub location_name: String,
    pub confidence_score: f64,
    pub source: String,
}

/// `POST /predict` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropPredictionRequest {
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "K")]
    pub k: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl From<&SoilDataResponse> for CropPredictionRequest {
    fn from(soil: &SoilDataResponse) -> Self {
        Self {
            n: soil.n,
            p: soil.p,
            k: soil.k,
            temperature: soil.temperature,
            humidity: soil.humidity,
            ph: soil.ph,
            rainfall: soil.rainfall,
        }
    }
}

/// One ranked crop from the prediction model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictedCrop {
    pub crop: String,
    /// 0.0-1.0
    pub probability: f64,
    pub yield_kg_per_hectare: f64,
    /// Thousands of rupees per hectare
    pub expected_profit_local: f64,
    pub sustainability_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PredictionMeta {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub model_accuracy: Option<f64>,
    #[serde(default)]
    pub total_crops: Option<u32>,
}

/// `POST /predict` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropPredictionResponse {
    pub recommendations: Vec<PredictedCrop>,
    #[serde(default)]
    pub meta: PredictionMeta,
}

/// Soil data and predictions fetched together for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendAnalysis {
    pub soil_data: SoilDataResponse,
    pub crop_recommendations: CropPredictionResponse,
}

/// Convert model output into ranked recommendations
pub fn map_predictions(response: &CropPredictionResponse) -> Vec<CropRecommendation> {
    response
        .recommendations
        .iter()
        .enumerate()
        .map(|(rank, predicted)| {
            let profile = crop_profile(&predicted.crop);
            CropRecommendation {
                name: predicted.crop.clone(),
                emoji: emoji_for_crop(&predicted.crop).to_string(),
                confidence: (predicted.probability * 100.0).round().max(0.0) as u32,
                // The backend reports kg/ha; the label is in tons, so the value is scaled
                expected_yield: format!(
                    "{:.1} tons/hectare",
                    predicted.yield_kg_per_hectare / 1000.0
                ),
                profit_margin: format!(
                    "₹{:.0}/hectare",
                    predicted.expected_profit_local * 1000.0
                ),
                investment_required: profile.investment_required,
                duration: profile.duration,
                difficulty: Difficulty::for_rank(rank),
                market_demand: profile.market_demand,
                water_requirement: profile.water_requirement,
                pros: profile.pros,
                cons: profile.cons,
                tips: profile.tips,
            }
        })
        .collect()
}

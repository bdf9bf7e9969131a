//! Soil analysis models and classification rules

use serde::{Deserialize, Serialize};

use crate::types::DataSource;

/// Soil fertility classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Fertility {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Fertility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fertility::Low => write!(f, "Low"),
            Fertility::Medium => write!(f, "Medium"),
            Fertility::High => write!(f, "High"),
        }
    }
}

/// USDA-style texture class from particle size fractions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SoilTexture {
    Clay,
    Sandy,
    Silty,
    #[serde(rename = "Clay Loam")]
    ClayLoam,
    #[serde(rename = "Sandy Loam")]
    SandyLoam,
    #[serde(rename = "Silty Loam")]
    SiltyLoam,
    Loam,
}

impl SoilTexture {
    pub fn is_clayey(&self) -> bool {
        matches!(self, SoilTexture::Clay | SoilTexture::ClayLoam)
    }

    pub fn is_sandy(&self) -> bool {
        matches!(self, SoilTexture::Sandy | SoilTexture::SandyLoam)
    }
}

impl std::fmt::Display for SoilTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoilTexture::Clay => write!(f, "Clay"),
            SoilTexture::Sandy => write!(f, "Sandy"),
            SoilTexture::Silty => write!(f, "Silty"),
            SoilTexture::ClayLoam => write!(f, "Clay Loam"),
            SoilTexture::SandyLoam => write!(f, "Sandy Loam"),
            SoilTexture::SiltyLoam => write!(f, "Silty Loam"),
            SoilTexture::Loam => write!(f, "Loam"),
        }
    }
}

/// Soil properties for a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilData {
    pub soil_type: String,
    pub ph: f64,
    /// kg/ha
    pub nitrogen: f64,
    /// kg/ha
    pub phosphorus: f64,
    /// kg/ha
    pub potassium: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organic_carbon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drainage: Option<String>,
    pub fertility: Fertility,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub source: DataSource,
}

/// Raw surface-layer measurements, already converted to working units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SoilMeasurements {
    pub ph: Option<f64>,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub organic_carbon: Option<f64>,
    pub clay: Option<f64>,
    pub sand: Option<f64>,
    pub silt: Option<f64>,
}

/// A zero or missing reading is treated as absent
fn reading_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => v,
        _ => default,
    }
}

/// Classify texture from clay, sand and silt percentages
pub fn determine_soil_texture(clay: f64, sand: f64, silt: f64) -> SoilTexture {
    if clay > 40.0 {
        SoilTexture::Clay
    } else if sand > 70.0 {
        SoilTexture::Sandy
    } else if silt > 50.0 {
        SoilTexture::Silty
    } else if clay > 27.0 && sand > 20.0 && sand < 45.0 {
        SoilTexture::ClayLoam
    } else if clay < 27.0 && sand > 52.0 {
        SoilTexture::SandyLoam
    } else if clay < 27.0 && silt > 28.0 && sand < 52.0 {
        SoilTexture::SiltyLoam
    } else {
        SoilTexture::Loam
    }
}

/// Regional Indian soil type from texture and latitude band
pub fn determine_soil_type(texture: SoilTexture, lat: f64) -> &'static str {
    if lat > 26.0 {
        if texture.is_clayey() {
            "Alluvial Soil"
        } else {
            "Sandy Loam"
        }
    } else if lat > 20.0 {
        if texture.is_clayey() {
            "Black Soil (Regur)"
        } else {
            "Mixed Red and Black Soil"
        }
    } else if texture.is_sandy() {
        "Red Sandy Soil"
    } else {
        "Red Soil"
    }
}

/// Nutrient score in 0..=8
pub fn fertility_score(n: f64, p: f64, k: f64, organic_carbon: f64) -> u8 {
    let tier = |value: f64, high: f64, medium: f64| -> u8 {
        if value > high {
            2
        } else if value > medium {
            1
        } else {
            0
        }
    };

    tier(n, 300.0, 200.0)
        + tier(p, 30.0, 15.0)
        + tier(k, 200.0, 100.0)
        + tier(organic_carbon, 20.0, 10.0)
}

pub fn assess_fertility(n: f64, p: f64, k: f64, organic_carbon: f64) -> Fertility {
    match fertility_score(n, p, k, organic_carbon) {
        6.. => Fertility::High,
        3..=5 => Fertility::Medium,
        _ => Fertility::Low,
    }
}

pub fn assess_drainage(clay: f64, sand: f64) -> &'static str {
    if clay > 40.0 {
        "Poor drainage"
    } else if sand > 70.0 {
        "Excellent drainage"
    } else if sand > 50.0 {
        "Good drainage"
    } else {
        "Moderate drainage"
    }
}

/// Amendment advice, at most four items
pub fn soil_recommendations(ph: f64, n: f64, p: f64, k: f64, fertility: Fertility) -> Vec<String> {
    let mut recommendations = Vec::new();

    if ph < 6.0 {
        recommendations.push("Apply lime to increase soil pH for better nutrient availability");
    } else if ph > 8.0 {
        recommendations.push("Apply sulfur or organic matter to reduce soil pH");
    }

    if n < 200.0 {
        recommendations.push("Increase nitrogen through urea or organic manure application");
    }
    if p < 20.0 {
        recommendations.push("Apply phosphorus fertilizer (DAP) for better root development");
    }
    if k < 120.0 {
        recommendations.push("Add potassium fertilizer (MOP) for improved plant health");
    }

    if fertility == Fertility::Low {
        recommendations.push("Apply compost and organic matter to improve soil structure");
        recommendations.push("Consider green manuring with legumes to boost nitrogen");
    }

    if recommendations.is_empty() {
        recommendations.push("Soil conditions are good - maintain with balanced fertilization");
    }

    recommendations
        .into_iter()
        .take(4)
        .map(String::from)
        .collect()
}

impl SoilData {
    /// Build a full analysis from surface-layer measurements
    pub fn from_measurements(m: SoilMeasurements, lat: f64) -> Self {
        let ph = reading_or(m.ph, 6.5);
        let nitrogen = reading_or(m.nitrogen, 200.0);
        let phosphorus = reading_or(m.phosphorus, 25.0);
        let potassium = reading_or(m.potassium, 150.0);
        let organic_carbon = reading_or(m.organic_carbon, 15.0);
        let clay = reading_or(m.clay, 25.0);
        let sand = reading_or(m.sand, 45.0);
        let silt = reading_or(m.silt, 30.0);

        let texture = determine_soil_texture(clay, sand, silt);
        let fertility = assess_fertility(nitrogen, phosphorus, potassium, organic_carbon);

        Self {
            soil_type: determine_soil_type(texture, lat).to_string(),
            ph: (ph * 10.0).round() / 10.0,
            nitrogen: nitrogen.round(),
            phosphorus: phosphorus.round(),
            potassium: potassium.round(),
            organic_carbon: Some((organic_carbon * 10.0).round() / 10.0),
            soil_class: Some(texture.to_string()),
            drainage: Some(assess_drainage(clay, sand).to_string()),
            fertility,
            recommendations: soil_recommendations(ph, nitrogen, phosphorus, potassium, fertility),
            source: DataSource::Live,
        }
    }

    /// Latitude-band estimate used when the soil provider is unavailable
    pub fn regional_estimate(lat: f64) -> Self {
        let (soil_type, ph, nitrogen, phosphorus, potassium) = if lat > 26.0 {
            ("Alluvial Soil", 7.2, 280.0, 30.0, 200.0)
        } else if lat > 20.0 {
            ("Black Soil (Regur)", 7.8, 220.0, 20.0, 150.0)
        } else {
            ("Red Soil", 6.2, 200.0, 18.0, 140.0)
        };

        Self {
            soil_type: soil_type.to_string(),
            ph,
            nitrogen,
            phosphorus,
            potassium,
            organic_carbon: Some(15.0),
            soil_class: Some(SoilTexture::Loam.to_string()),
            drainage: Some("Good drainage".to_string()),
            fertility: Fertility::Medium,
            recommendations: vec![
                "Apply balanced NPK fertilizer as per soil test".to_string(),
                "Add organic compost to improve soil health".to_string(),
                "Maintain proper crop rotation for soil fertility".to_string(),
            ],
            source: DataSource::RegionalEstimate,
        }
    }

    /// Generic soil used when nothing about the location is known
    pub fn generic_default() -> Self {
        Self {
            soil_type: "Loamy".to_string(),
            ph: 6.5,
            nitrogen: 180.0,
            phosphorus: 25.0,
            potassium: 150.0,
            organic_carbon: None,
            soil_class: None,
            drainage: None,
            fertility: Fertility::Medium,
            recommendations: Vec::new(),
            source: DataSource::Default,
        }
    }
}

// ============================================================================
// Crop suitability
// ============================================================================

/// Soil suitability level for a crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Suitability {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl std::fmt::Display for Suitability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Suitability::Excellent => write!(f, "Excellent"),
            Suitability::Good => write!(f, "Good"),
            Suitability::Fair => write!(f, "Fair"),
            Suitability::Poor => write!(f, "Poor"),
        }
    }
}

/// Minimum soil conditions for a crop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropSoilRequirements {
    pub ph_min: f64,
    pub ph_max: f64,
    pub n_min: f64,
    pub p_min: f64,
    pub k_min: f64,
}

/// Requirements for the supported crops; anything else is judged as rice
pub fn crop_soil_requirements(crop: &str) -> CropSoilRequirements {
    match crop.trim().to_lowercase().as_str() {
        "wheat" => CropSoilRequirements { ph_min: 6.0, ph_max: 7.5, n_min: 180.0, p_min: 25.0, k_min: 120.0 },
        "tomato" => CropSoilRequirements { ph_min: 6.0, ph_max: 6.8, n_min: 250.0, p_min: 30.0, k_min: 200.0 },
        "cotton" => CropSoilRequirements { ph_min: 5.8, ph_max: 8.0, n_min: 200.0, p_min: 25.0, k_min: 150.0 },
        _ => CropSoilRequirements { ph_min: 5.5, ph_max: 7.0, n_min: 200.0, p_min: 20.0, k_min: 150.0 },
    }
}

/// Result of matching soil against a crop's requirements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropSuitability {
    pub crop: String,
    pub suitability: Suitability,
    pub score: u32,
    pub factors: Vec<String>,
}

pub fn assess_crop_suitability(soil: &SoilData, crop: &str) -> CropSuitability {
    let req = crop_soil_requirements(crop);
    let mut score = 0;
    let mut factors = Vec::new();

    if soil.ph >= req.ph_min && soil.ph <= req.ph_max {
        score += 25;
        factors.push("pH level is optimal for this crop".to_string());
    } else {
        factors.push(format!("pH needs adjustment (current: {})", soil.ph));
    }

    if soil.nitrogen >= req.n_min {
        score += 25;
        factors.push("Nitrogen levels are adequate".to_string());
    } else {
        factors.push("Nitrogen supplementation needed".to_string());
    }

    if soil.phosphorus >= req.p_min {
        score += 25;
        factors.push("Phosphorus levels are sufficient".to_string());
    } else {
        factors.push("Phosphorus fertilizer recommended".to_string());
    }

    if soil.potassium >= req.k_min {
        score += 25;
        factors.push("Potassium levels are good".to_string());
    } else {
        factors.push("Potassium enhancement needed".to_string());
    }

    let suitability = if score >= 90 {
        Suitability::Excellent
    } else if score >= 70 {
        Suitability::Good
    } else if score >= 50 {
        Suitability::Fair
    } else {
        Suitability::Poor
    };

    CropSuitability {
        crop: crop.to_string(),
        suitability,
        score,
        factors,
    }
}

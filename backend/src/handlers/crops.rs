//! HTTP handlers for the crop catalog

use axum::{extract::Path, Json};
use serde::Serialize;
use shared::{crop_profile, emoji_for_crop, is_cataloged, CropProfile};

use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct CropDetail {
    #[serde(flatten)]
    pub profile: CropProfile,
    pub emoji: String,
}

/// Catalog entry for a crop display name, e.g. `Onion` or `Chili (Red)`
pub async fn get_crop(Path(name): Path<String>) -> AppResult<Json<CropDetail>> {
    let name = name.trim();
    if !is_cataloged(name) {
        return Err(AppError::NotFound(format!("Crop '{}'", name)));
    }

    Ok(Json(CropDetail {
        emoji: emoji_for_crop(name).to_string(),
        profile: crop_profile(name),
    }))
}

//! Location resolution service
//!
//! Forward chain: Google -> Nominatim -> Maharashtra table -> estimate.
//! The chain always produces a result; only reverse geocoding can fail.

use shared::{
    estimated_location, regional_location, Coordinates, LocationResult, ReverseGeocodingResult,
};

use crate::error::{AppError, AppResult};
use crate::external::GeocodingClient;

/// Minimum query length for place search
pub const MIN_SEARCH_LEN: usize = 2;

/// Maximum suggestions returned by place search
pub const SEARCH_LIMIT: u32 = 5;

/// Location service
#[derive(Clone)]
pub struct LocationService {
    client: GeocodingClient,
}

impl LocationService {
    /// Create a new LocationService instance
    pub fn new(client: GeocodingClient) -> Self {
        Self { client }
    }

    /// Resolve a place name through the fallback chain
    pub async fn resolve(&self, query: &str) -> LocationResult {
        let query = query.trim();

        if self.client.has_google_key() {
            match self.client.google_geocode(query).await {
                Ok(location) => return location,
                Err(e) => tracing::warn!("Google geocoding failed for '{}': {}", query, e),
            }
        }

        match self.client.nominatim_geocode(query).await {
            Ok(location) => return location,
            Err(e) => tracing::warn!("Nominatim geocoding failed for '{}': {}", query, e),
        }

        if let Some(location) = regional_location(query) {
            tracing::info!("Resolved '{}' from the regional table", query);
            return location;
        }

        tracing::warn!("All geocoding sources failed for '{}', using estimate", query);
        estimated_location(query)
    }

    /// Resolve coordinates to an address (Google, then Nominatim)
    pub async fn reverse(&self, coords: Coordinates) -> AppResult<ReverseGeocodingResult> {
        if self.client.has_google_key() {
            match self.client.google_reverse(coords).await {
                Ok(result) => return Ok(result),
                Err(e) => tracing::warn!(
                    "Google reverse geocoding failed for ({}, {}): {}",
                    coords.lat,
                    coords.lng,
                    e
                ),
            }
        }

        self.client.nominatim_reverse(coords).await.map_err(|e| {
            tracing::warn!(
                "Nominatim reverse geocoding failed for ({}, {}): {}",
                coords.lat,
                coords.lng,
                e
            );
            AppError::Geocoding(format!(
                "Unable to resolve address for {}",
                coords.label()
            ))
        })
    }

    /// Place suggestions; empty for short queries or on failure
    pub async fn search(&self, query: &str) -> Vec<LocationResult> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_LEN {
            return Vec::new();
        }

        self.client
            .nominatim_search(query, SEARCH_LIMIT)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Place search failed for '{}': {}", query, e);
                Vec::new()
            })
    }
}

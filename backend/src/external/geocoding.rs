//! Geocoding API client
//!
//! Google Geocoding is used when a key is configured; Nominatim
//! (OpenStreetMap) is the free secondary provider.

use reqwest::Client;
use serde::Deserialize;
use shared::{Address, Coordinates, GeocodeSource, LocationResult, ReverseGeocodingResult};

use super::{http_client, read_json, request_failed, PROVIDER_TIMEOUT};
use crate::config::{configured_key, GeocodingConfig};
use crate::error::{AppError, AppResult};

const UNKNOWN_CITY: &str = "Unknown City";
const UNKNOWN_STATE: &str = "Unknown State";
const DEFAULT_COUNTRY: &str = "India";

/// Geocoding API client
#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    google_api_key: Option<String>,
    google_base_url: String,
    nominatim_url: String,
    user_agent: String,
}

/// Google Geocoding API response
#[derive(Debug, Deserialize)]
struct GoogleResponse {
    status: String,
    #[serde(default)]
    results: Vec<GoogleResult>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    formatted_address: String,
    geometry: GoogleGeometry,
    #[serde(default)]
    address_components: Vec<GoogleComponent>,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: GoogleLatLng,
}

#[derive(Debug, Deserialize)]
struct GoogleLatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct GoogleComponent {
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}

/// Nominatim search/reverse entry
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    #[serde(default)]
    lat: Option<String>,
    #[serde(default)]
    lon: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: NominatimAddress,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state_district: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country: Option<String>,
    postcode: Option<String>,
}

impl GeocodingClient {
    /// Create a new GeocodingClient from configuration
    pub fn new(config: &GeocodingConfig) -> Self {
        Self {
            client: http_client(PROVIDER_TIMEOUT),
            google_api_key: configured_key(&config.google_api_key).map(String::from),
            google_base_url: config.google_base_url.clone(),
            nominatim_url: config.nominatim_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Whether the commercial provider can be tried at all
    pub fn has_google_key(&self) -> bool {
        self.google_api_key.is_some()
    }

    fn google_key(&self) -> AppResult<&str> {
        self.google_api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Google Geocoding API key not configured".into()))
    }

    /// Forward geocode a place name with Google
    pub async fn google_geocode(&self, query: &str) -> AppResult<LocationResult> {
        let key = self.google_key()?;
        let response = self
            .client
            .get(&self.google_base_url)
            .query(&[("address", query), ("key", key), ("region", "in")])
            .send()
            .await
            .map_err(|e| request_failed("Google Geocoding", e))?;

        let data: GoogleResponse = read_json(response, "Google Geocoding").await?;
        let result = first_google_result(data)?;

        Ok(LocationResult {
            name: result.formatted_address.clone(),
            coordinates: Coordinates::new(result.geometry.location.lat, result.geometry.location.lng),
            address: google_address(&result),
            source: GeocodeSource::Google,
        })
    }

    /// Reverse geocode coordinates with Google
    pub async fn google_reverse(&self, coords: Coordinates) -> AppResult<ReverseGeocodingResult> {
        let key = self.google_key()?;
        let latlng = format!("{},{}", coords.lat, coords.lng);
        let response = self
            .client
            .get(&self.google_base_url)
            .query(&[("latlng", latlng.as_str()), ("key", key)])
            .send()
            .await
            .map_err(|e| request_failed("Google Geocoding", e))?;

        let data: GoogleResponse = read_json(response, "Google Geocoding").await?;
        let result = first_google_result(data)?;

        Ok(ReverseGeocodingResult {
            name: result.formatted_address.clone(),
            address: google_address(&result),
            source: GeocodeSource::Google,
        })
    }

    /// Forward geocode a place name with Nominatim, restricted to India
    pub async fn nominatim_geocode(&self, query: &str) -> AppResult<LocationResult> {
        let mut places = self.nominatim_search(query, 1).await?;
        if places.is_empty() {
            return Err(AppError::Geocoding(format!("No results for '{}'", query)));
        }
        Ok(places.remove(0))
    }

    /// Up to `limit` Nominatim matches for a query
    pub async fn nominatim_search(&self, query: &str, limit: u32) -> AppResult<Vec<LocationResult>> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(format!("{}/search", self.nominatim_url))
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("countrycodes", "in"),
                ("limit", limit.as_str()),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .map_err(|e| request_failed("Nominatim", e))?;

        let places: Vec<NominatimPlace> = read_json(response, "Nominatim").await?;
        Ok(places.into_iter().filter_map(nominatim_location).collect())
    }

    /// Reverse geocode coordinates with Nominatim
    pub async fn nominatim_reverse(&self, coords: Coordinates) -> AppResult<ReverseGeocodingResult> {
        let lat = coords.lat.to_string();
        let lon = coords.lng.to_string();
        let response = self
            .client
            .get(format!("{}/reverse", self.nominatim_url))
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("format", "json"),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .map_err(|e| request_failed("Nominatim", e))?;

        let place: NominatimPlace = read_json(response, "Nominatim").await?;
        if let Some(error) = place.error {
            return Err(AppError::Geocoding(error));
        }
        let name = place
            .display_name
            .clone()
            .ok_or_else(|| AppError::Geocoding("Nominatim returned no address".into()))?;

        Ok(ReverseGeocodingResult {
            address: nominatim_address(&place.address, &name),
            name,
            source: GeocodeSource::Nominatim,
        })
    }
}

fn first_google_result(data: GoogleResponse) -> AppResult<GoogleResult> {
    if data.status != "OK" {
        return Err(AppError::Geocoding(format!(
            "Google Geocoding status {}",
            data.status
        )));
    }
    data.results
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Geocoding("Google Geocoding returned no results".into()))
}

fn google_component(result: &GoogleResult, kind: &str) -> Option<String> {
    result
        .address_components
        .iter()
        .find(|c| c.types.iter().any(|t| t == kind))
        .map(|c| c.long_name.clone())
}

fn google_address(result: &GoogleResult) -> Address {
    Address {
        city: google_component(result, "locality").unwrap_or_else(|| UNKNOWN_CITY.to_string()),
        state: google_component(result, "administrative_area_level_1")
            .unwrap_or_else(|| UNKNOWN_STATE.to_string()),
        country: google_component(result, "country").unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
        district: google_component(result, "administrative_area_level_2"),
        pincode: google_component(result, "postal_code"),
        formatted_address: result.formatted_address.clone(),
    }
}

fn nominatim_address(address: &NominatimAddress, display_name: &str) -> Address {
    let city = address
        .city
        .as_ref()
        .or(address.town.as_ref())
        .or(address.village.as_ref())
        .cloned()
        .unwrap_or_else(|| UNKNOWN_CITY.to_string());

    Address {
        city,
        state: address
            .state
            .clone()
            .unwrap_or_else(|| UNKNOWN_STATE.to_string()),
        country: address
            .country
            .clone()
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
        district: address.state_district.clone().or_else(|| address.county.clone()),
        pincode: address.postcode.clone(),
        formatted_address: display_name.to_string(),
    }
}

fn nominatim_location(place: NominatimPlace) -> Option<LocationResult> {
    let lat = place.lat.as_deref()?.parse::<f64>().ok()?;
    let lng = place.lon.as_deref()?.parse::<f64>().ok()?;
    let name = place.display_name.clone()?;

    Some(LocationResult {
        address: nominatim_address(&place.address, &name),
        name,
        coordinates: Coordinates::new(lat, lng),
        source: GeocodeSource::Nominatim,
    })
}

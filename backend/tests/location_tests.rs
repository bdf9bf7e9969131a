//! Location resolution integration tests
//!
//! Tests for the geocoding chain including:
//! - Google -> Nominatim -> regional table -> estimate ordering
//! - Reverse geocoding defaults and failure
//! - Place search limits
//! - GPS failure taxonomy

use cropai_backend::{config::GeocodingConfig, external::GeocodingClient, services::LocationService};
use mockito::{Matcher, Server};
use proptest::prelude::*;
use shared::{
    estimated_location, regional_location, Coordinates, GeocodeSource, GpsError,
    ESTIMATED_COORDINATES, GPS_FALLBACK_LOCATION, GPS_TIMEOUT_MS,
};

const UNREACHABLE: &str = "http://127.0.0.1:9";

fn service(google_url: &str, nominatim_url: &str, google_key: Option<&str>) -> LocationService {
    let config = GeocodingConfig {
        google_api_key: google_key.map(String::from),
        google_base_url: google_url.to_string(),
        nominatim_url: nominatim_url.to_string(),
        ..Default::default()
    };
    LocationService::new(GeocodingClient::new(&config))
}

const NOMINATIM_NASHIK: &str = r#"[{
    "lat": "19.9975", "lon": "73.7898",
    "display_name": "Nashik, Nashik District, Maharashtra, 422001, India",
    "address": {"city": "Nashik", "state_district": "Nashik District",
                "state": "Maharashtra", "postcode": "422001", "country": "India"}
}]"#;

const GOOGLE_PUNE: &str = r#"{
    "status": "OK",
    "results": [{
        "formatted_address": "Pune, Maharashtra, India",
        "geometry": {"location": {"lat": 18.5204, "lng": 73.8567}},
        "address_components": [
            {"long_name": "Pune", "types": ["locality", "political"]},
            {"long_name": "Maharashtra", "types": ["administrative_area_level_1"]},
            {"long_name": "India", "types": ["country"]}
        ]
    }]
}"#;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_regional_table_exact_and_partial() {
        let exact = regional_location("Satara").unwrap();
        assert_eq!(exact.source, GeocodeSource::RegionalTable);
        assert!(exact.name.starts_with("Satara"));

        // Term contains the key
        let partial = regional_location("Kolhapur city").unwrap();
        assert!(partial.name.starts_with("Kolhapur"));

        assert!(regional_location("Atlantis").is_none());
    }

    #[test]
    fn test_estimated_location_placeholder() {
        let estimate = estimated_location(" Atlantis ");
        assert_eq!(estimate.name, "Atlantis, Maharashtra, India (estimated)");
        assert_eq!(estimate.coordinates, ESTIMATED_COORDINATES);
        assert_eq!(estimate.source, GeocodeSource::Estimated);
    }

    #[test]
    fn test_haversine_distance() {
        let mumbai = Coordinates::new(19.0760, 72.8777);
        let pune = Coordinates::new(18.5204, 73.8567);
        let km = mumbai.distance_km(&pune);
        assert!((115.0..125.0).contains(&km), "got {}", km);
    }

    #[test]
    fn test_gps_failure_messages_are_distinct() {
        let errors = [
            GpsError::PermissionDenied,
            GpsError::PositionUnavailable,
            GpsError::Timeout,
            GpsError::Unsupported,
        ];
        for (i, a) in errors.iter().enumerate() {
            for b in errors.iter().skip(i + 1) {
                assert_ne!(a.to_string(), b.to_string());
            }
            assert!(a.fallback_notice().ends_with(GPS_FALLBACK_LOCATION));
        }
        assert_eq!(GPS_TIMEOUT_MS, 8000);
    }

    /// Queries below the minimum length return before any request
    #[test]
    fn test_short_search_is_empty() {
        let service = service(UNREACHABLE, UNREACHABLE, None);
        assert!(tokio_test::block_on(service.search("N")).is_empty());
        assert!(tokio_test::block_on(service.search(" ")).is_empty());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Distance is symmetric and never negative
    #[test]
    fn prop_distance_symmetric(
        lat1 in -89.0f64..89.0, lng1 in -179.0f64..179.0,
        lat2 in -89.0f64..89.0, lng2 in -179.0f64..179.0,
    ) {
        let a = Coordinates::new(lat1, lng1);
        let b = Coordinates::new(lat2, lng2);
        let ab = a.distance_km(&b);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - b.distance_km(&a)).abs() < 1e-6);
    }

    /// The estimate always echoes the trimmed input
    #[test]
    fn prop_estimate_echoes_input(name in "[A-Za-z]{1,20}") {
        let estimate = estimated_location(&name);
        prop_assert!(estimate.name.starts_with(&name));
        prop_assert_eq!(estimate.source, GeocodeSource::Estimated);
    }
}

// ============================================================================
// Resolution Chain Tests
// ============================================================================

#[tokio::test]
async fn test_google_is_tried_first_when_keyed() {
    let mut server = Server::new_async().await;
    let google = server
        .mock("GET", "/geocode")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("address".into(), "Pune".into()),
            Matcher::UrlEncoded("region".into(), "in".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GOOGLE_PUNE)
        .create_async()
        .await;
    let nominatim = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let google_url = format!("{}/geocode", server.url());
    let service = service(&google_url, &server.url(), Some("test-key"));
    let location = service.resolve("Pune").await;

    google.assert_async().await;
    nominatim.assert_async().await;
    assert_eq!(location.source, GeocodeSource::Google);
    assert_eq!(location.address.city, "Pune");
    assert_eq!(location.coordinates, Coordinates::new(18.5204, 73.8567));
}

#[tokio::test]
async fn test_nominatim_used_without_google_key() {
    let mut server = Server::new_async().await;
    let nominatim = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "Nashik".into()),
            Matcher::UrlEncoded("countrycodes".into(), "in".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .match_header("user-agent", "CropAI-SmartFarming/1.0")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(NOMINATIM_NASHIK)
        .create_async()
        .await;

    let service = service(UNREACHABLE, &server.url(), None);
    let location = service.resolve("Nashik").await;

    nominatim.assert_async().await;
    assert_eq!(location.source, GeocodeSource::Nominatim);
    assert_eq!(location.address.district.as_deref(), Some("Nashik District"));
    assert_eq!(location.address.pincode.as_deref(), Some("422001"));
}

#[tokio::test]
async fn test_failed_google_falls_through_to_nominatim() {
    let mut server = Server::new_async().await;
    let _google = server
        .mock("GET", "/geocode")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status": "REQUEST_DENIED", "results": []}"#)
        .create_async()
        .await;
    let _nominatim = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(NOMINATIM_NASHIK)
        .create_async()
        .await;

    let google_url = format!("{}/geocode", server.url());
    let service = service(&google_url, &server.url(), Some("bad-key"));
    assert_eq!(service.resolve("Nashik").await.source, GeocodeSource::Nominatim);
}

#[tokio::test]
async fn test_empty_nominatim_result_uses_regional_table() {
    let mut server = Server::new_async().await;
    let _nominatim = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let service = service(UNREACHABLE, &server.url(), None);
    let location = service.resolve("Sangli").await;
    assert_eq!(location.source, GeocodeSource::RegionalTable);
}

#[tokio::test]
async fn test_offline_unknown_place_is_estimated() {
    let service = service(UNREACHABLE, UNREACHABLE, Some("key"));
    let location = service.resolve("Atlantis").await;
    assert_eq!(location.source, GeocodeSource::Estimated);
    assert_eq!(location.coordinates, ESTIMATED_COORDINATES);
}

// ============================================================================
// Reverse Geocoding and Search Tests
// ============================================================================

#[tokio::test]
async fn test_reverse_geocode_defaults_missing_parts() {
    let mut server = Server::new_async().await;
    let _reverse = server
        .mock("GET", "/reverse")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"display_name": "Somewhere, India", "address": {}}"#)
        .create_async()
        .await;

    let service = service(UNREACHABLE, &server.url(), None);
    let result = service
        .reverse(Coordinates::new(19.5, 74.1))
        .await
        .unwrap();

    assert_eq!(result.name, "Somewhere, India");
    assert_eq!(result.address.city, "Unknown City");
    assert_eq!(result.address.state, "Unknown State");
    assert_eq!(result.address.country, "India");
}

#[tokio::test]
async fn test_reverse_geocode_error_body_fails() {
    let mut server = Server::new_async().await;
    let _reverse = server
        .mock("GET", "/reverse")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"error": "Unable to geocode"}"#)
        .create_async()
        .await;

    let service = service(UNREACHABLE, &server.url(), None);
    assert!(service.reverse(Coordinates::new(0.0, 0.0)).await.is_err());
}

#[tokio::test]
async fn test_search_limits_and_short_queries() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("limit".into(), "5".into()))
        .with_status(200)
        .with_body(NOMINATIM_NASHIK)
        .expect(1)
        .create_async()
        .await;

    let service = service(UNREACHABLE, &server.url(), None);
    assert!(service.search("N").await.is_empty());
    assert_eq!(service.search("Nas").await.len(), 1);
    search.assert_async().await;
}

#[tokio::test]
async fn test_search_failure_is_empty() {
    let service = service(UNREACHABLE, UNREACHABLE, None);
    assert!(service.search("Nashik").await.is_empty());
}

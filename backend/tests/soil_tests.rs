//! Soil integration tests
//!
//! Tests for soil analysis including:
//! - SoilGrids surface layer parsing and unit conversion
//! - Latitude-band regional fallback
//! - Fertility scoring and crop suitability

use cropai_backend::{external::SoilGridsClient, services::SoilService};
use mockito::{Matcher, Server};
use proptest::prelude::*;
use shared::{
    assess_crop_suitability, assess_fertility, fertility_score, DataSource, Fertility, SoilData,
    Suitability,
};

const UNREACHABLE: &str = "http://127.0.0.1:9";

fn layer(name: &str, mean: f64) -> String {
    format!(
        r#"{{"name": "{}", "depths": [{{"label": "0-5cm", "values": {{"mean": {}}}}}]}}"#,
        name, mean
    )
}

fn soilgrids_body() -> String {
    let layers = [
        layer("phh2o", 72.0),
        layer("nitrogen", 310.0),
        layer("ocd", 230.0),
        layer("clay", 450.0),
        layer("sand", 250.0),
        layer("silt", 300.0),
    ];
    format!(r#"{{"properties": {{"layers": [{}]}}}}"#, layers.join(","))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_regional_bands() {
        let north = SoilData::regional_estimate(28.6);
        assert_eq!(north.soil_type, "Alluvial Soil");
        assert_eq!((north.ph, north.nitrogen, north.phosphorus, north.potassium), (7.2, 280.0, 30.0, 200.0));

        let deccan = SoilData::regional_estimate(21.1);
        assert_eq!(deccan.soil_type, "Black Soil (Regur)");
        assert_eq!((deccan.ph, deccan.nitrogen, deccan.phosphorus, deccan.potassium), (7.8, 220.0, 20.0, 150.0));

        let south = SoilData::regional_estimate(12.9);
        assert_eq!(south.soil_type, "Red Soil");
        assert_eq!((south.ph, south.nitrogen, south.phosphorus, south.potassium), (6.2, 200.0, 18.0, 140.0));
    }

    #[test]
    fn test_fertility_thresholds() {
        assert_eq!(assess_fertility(350.0, 35.0, 250.0, 25.0), Fertility::High);
        assert_eq!(assess_fertility(250.0, 20.0, 150.0, 15.0), Fertility::Medium);
        assert_eq!(assess_fertility(100.0, 10.0, 50.0, 5.0), Fertility::Low);
    }

    #[test]
    fn test_suitability_scoring() {
        let rich = SoilData {
            ph: 6.5,
            nitrogen: 300.0,
            phosphorus: 40.0,
            potassium: 250.0,
            ..SoilData::generic_default()
        };
        let tomato = assess_crop_suitability(&rich, "Tomato");
        assert_eq!(tomato.score, 100);
        assert_eq!(tomato.suitability, Suitability::Excellent);

        // Generic soil: only nitrogen falls short for rice
        let generic = assess_crop_suitability(&SoilData::generic_default(), "rice");
        assert_eq!(generic.score, 75);
        assert_eq!(generic.suitability, Suitability::Good);
        assert!(generic.factors.contains(&"Nitrogen supplementation needed".to_string()));
    }

    #[test]
    fn test_unknown_crop_judged_as_rice() {
        let soil = SoilData::regional_estimate(12.9);
        assert_eq!(
            assess_crop_suitability(&soil, "quinoa").score,
            assess_crop_suitability(&soil, "rice").score
        );
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Fertility never decreases when a nutrient increases
    #[test]
    fn prop_fertility_monotone(
        n in 0.0f64..500.0, p in 0.0f64..60.0, k in 0.0f64..400.0, oc in 0.0f64..40.0,
        bump in 0.0f64..200.0,
    ) {
        let base = fertility_score(n, p, k, oc);
        prop_assert!(fertility_score(n + bump, p, k, oc) >= base);
        prop_assert!(fertility_score(n, p + bump, k, oc) >= base);
        prop_assert!(fertility_score(n, p, k + bump, oc) >= base);
        prop_assert!(fertility_score(n, p, k, oc + bump) >= base);
        prop_assert!(base <= 8);
    }

    /// Suitability score is a multiple of 25 in 0..=100
    #[test]
    fn prop_suitability_score_steps(
        ph in 4.0f64..9.0, n in 0.0f64..400.0, p in 0.0f64..60.0, k in 0.0f64..300.0,
    ) {
        let soil = SoilData { ph, nitrogen: n, phosphorus: p, potassium: k, ..SoilData::generic_default() };
        let result = assess_crop_suitability(&soil, "cotton");
        prop_assert!(result.score <= 100);
        prop_assert_eq!(result.score % 25, 0);
        prop_assert_eq!(result.factors.len(), 4);
    }
}

// ============================================================================
// Provider Tests
// ============================================================================

#[tokio::test]
async fn test_soilgrids_surface_layer() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("depth".into(), "0-5cm".into()),
            Matcher::UrlEncoded("value".into(), "mean".into()),
            Matcher::UrlEncoded("property".into(), "phosav".into()),
            Matcher::UrlEncoded("property".into(), "potassium".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(soilgrids_body())
        .create_async()
        .await;

    let client = SoilGridsClient::new(format!("{}/query", server.url()));
    let soil = client.get_soil_data(21.15, 79.09).await.unwrap();

    mock.assert_async().await;
    assert_eq!(soil.ph, 7.2);
    assert_eq!(soil.nitrogen, 310.0);
    // Layers absent from the response take their defaults
    assert_eq!(soil.phosphorus, 25.0);
    assert_eq!(soil.potassium, 150.0);
    assert_eq!(soil.organic_carbon, Some(23.0));
    assert_eq!(soil.soil_class.as_deref(), Some("Clay"));
    assert_eq!(soil.soil_type, "Black Soil (Regur)");
    assert_eq!(soil.drainage.as_deref(), Some("Poor drainage"));
    assert_eq!(soil.source, DataSource::Live);
    assert!(soil.recommendations.len() <= 4);
}

#[tokio::test]
async fn test_soilgrids_phosphorus_and_potassium() {
    let mut server = Server::new_async().await;
    let layers = [layer("phh2o", 65.0), layer("phosav", 34.0), layer("potassium", 6.0)];
    let _mock = server
        .mock("GET", "/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"properties": {{"layers": [{}]}}}}"#, layers.join(",")))
        .create_async()
        .await;

    let client = SoilGridsClient::new(format!("{}/query", server.url()));
    let soil = client.get_soil_data(18.52, 73.86).await.unwrap();

    assert_eq!(soil.phosphorus, 34.0);
    // 6 cmol(+)/kg x 39.1
    assert_eq!(soil.potassium, 235.0);
}

#[tokio::test]
async fn test_unreachable_soil_uses_regional_estimate() {
    let service = SoilService::new(SoilGridsClient::new(UNREACHABLE.to_string()));
    let soil = service.soil_data(28.6, 77.2).await;
    assert_eq!(soil.soil_type, "Alluvial Soil");
    assert_eq!(soil.source, DataSource::RegionalEstimate);
}

#[tokio::test]
async fn test_malformed_soil_response_uses_regional_estimate() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"unexpected": true}"#)
        .create_async()
        .await;

    let service = SoilService::new(SoilGridsClient::new(format!("{}/query", server.url())));
    let suitability = service.crop_suitability(12.9, 77.6, "wheat").await;
    assert_eq!(suitability.crop, "wheat");
    // Red Soil estimate: pH 6.2, N 200, P 18, K 140
    assert_eq!(suitability.score, 75);
    assert_eq!(suitability.suitability, Suitability::Good);
}

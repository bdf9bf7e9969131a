//! HTTP handlers for commodity price endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{parse_commodity_list, validate_alert_threshold, MarketPrice};

use super::{CoordinateQuery, TextQuery};
use crate::error::{AppError, AppResult};
use crate::services::market::NEARBY_LIMIT;
use crate::services::MarketService;
use crate::AppState;

/// Query parameters for current prices
#[derive(Debug, Deserialize)]
pub struct PricesQuery {
    /// Comma-separated commodity names
    pub commodities: Option<String>,
}

/// Current prices, optionally filtered by commodity
pub async fn market_prices(
    State(state): State<AppState>,
    Query(query): Query<PricesQuery>,
) -> Json<Vec<MarketPrice>> {
    let commodities = query
        .commodities
        .as_deref()
        .map(parse_commodity_list)
        .unwrap_or_default();

    let service = MarketService::new(state.market);
    Json(service.current_prices(&commodities).await)
}

/// Prices in the region around a coordinate
pub async fn nearby_prices(
    State(state): State<AppState>,
    Query(query): Query<CoordinateQuery>,
) -> AppResult<Json<Vec<MarketPrice>>> {
    let coords = query.coordinates()?;
    let service = MarketService::new(state.market);
    Ok(Json(service.nearby(&coords, NEARBY_LIMIT).await))
}

/// Search prices by commodity, variety, market or state
pub async fn search_prices(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> Json<Vec<MarketPrice>> {
    let service = MarketService::new(state.market);
    Json(service.search(&query.q).await)
}

/// Query parameters for price alerts
#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    /// Minimum absolute change in percent
    pub threshold: Option<f64>,
}

/// Prices whose change meets the alert threshold
pub async fn price_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertQuery>,
) -> AppResult<Json<Vec<MarketPrice>>> {
    let threshold = match query.threshold {
        Some(t) => {
            validate_alert_threshold(t).map_err(|m| AppError::invalid("threshold", m))?;
            let t = Decimal::try_from(t)
                .map_err(|_| AppError::invalid("threshold", "Invalid alert threshold"))?;
            Some(t)
        }
        None => None,
    };

    let service = MarketService::new(state.market);
    Ok(Json(service.alerts(threshold).await))
}

//! Market price service
//!
//! Live quotes come from the open-data feed; the reference table stands in
//! whenever the feed is unavailable or returns nothing.

use rust_decimal::Decimal;
use shared::{
    filter_by_commodities, nearby_prices, price_alerts, reference_prices, search_prices,
    Coordinates, MarketPrice,
};

use super::weather::india_now;
use crate::external::MarketClient;

/// Maximum quotes returned for a region
pub const NEARBY_LIMIT: usize = 20;

/// Default alert threshold in percent
pub const DEFAULT_ALERT_THRESHOLD: i64 = 5;

/// Market service
#[derive(Clone)]
pub struct MarketService {
    client: MarketClient,
}

impl MarketService {
    /// Create a new MarketService instance
    pub fn new(client: MarketClient) -> Self {
        Self { client }
    }

    /// Current prices, optionally filtered by commodity
    pub async fn current_prices(&self, commodities: &[String]) -> Vec<MarketPrice> {
        // The feed filters on one commodity only; wider filters run locally
        let feed_filter = match commodities {
            [single] => Some(single.as_str()),
            _ => None,
        };

        match self.client.get_prices(feed_filter).await {
            Ok(prices) if !prices.is_empty() => filter_by_commodities(prices, commodities),
            Ok(_) => {
                tracing::warn!("Market feed returned no records, using reference prices");
                reference_prices(commodities, india_now().date())
            }
            Err(e) => {
                tracing::warn!("Market feed failed: {}", e);
                reference_prices(commodities, india_now().date())
            }
        }
    }

    /// Quotes from the region around a point
    pub async fn nearby(&self, coords: &Coordinates, limit: usize) -> Vec<MarketPrice> {
        let prices = self.current_prices(&[]).await;
        let nearby = nearby_prices(&prices, coords, limit);
        if nearby.is_empty() {
            tracing::debug!("No quotes for region around ({}, {})", coords.lat, coords.lng);
        }
        nearby
    }

    pub async fn search(&self, query: &str) -> Vec<MarketPrice> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let prices = self.current_prices(&[]).await;
        search_prices(&prices, query)
    }

    /// Quotes whose move is at least `threshold` percent
    pub async fn alerts(&self, threshold: Option<Decimal>) -> Vec<MarketPrice> {
        let threshold = threshold.unwrap_or_else(|| Decimal::from(DEFAULT_ALERT_THRESHOLD));
        let prices = self.current_prices(&[]).await;
        price_alerts(&prices, threshold)
    }
}

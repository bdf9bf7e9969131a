//! Commodity market price models

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::{Coordinates, DataSource};

/// Unit all mandi prices are quoted in
pub const PRICE_UNIT: &str = "Rs/Quintal";

/// Direction of a price movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Up,
    Down,
    Stable,
}

impl std::fmt::Display for PriceTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceTrend::Up => write!(f, "up"),
            PriceTrend::Down => write!(f, "down"),
            PriceTrend::Stable => write!(f, "stable"),
        }
    }
}

/// A commodity price quote at one market
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketPrice {
    pub commodity: String,
    pub variety: String,
    pub market: String,
    pub state: String,
    pub district: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_price: Option<Decimal>,
    pub unit: String,
    pub date: NaiveDate,
    pub trend: PriceTrend,
    pub change_percent: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub source: DataSource,
}

impl MarketPrice {
    fn dedup_key(&self) -> String {
        format!("{}-{}-{}", self.commodity, self.variety, self.market)
    }
}

pub fn calculate_trend(current: Decimal, previous: Option<Decimal>) -> PriceTrend {
    match previous {
        Some(prev) if !prev.is_zero() && prev != current => {
            if current > prev {
                PriceTrend::Up
            } else {
                PriceTrend::Down
            }
        }
        _ => PriceTrend::Stable,
    }
}

/// Percentage change rounded to two places; zero without a previous price
pub fn calculate_change_percent(current: Decimal, previous: Option<Decimal>) -> Decimal {
    match previous {
        Some(prev) if !prev.is_zero() => ((current - prev) / prev * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        _ => Decimal::ZERO,
    }
}

/// Drop repeated commodity/variety/market quotes and order newest first
pub fn deduplicate_and_sort(prices: Vec<MarketPrice>) -> Vec<MarketPrice> {
    let mut seen = std::collections::HashSet::new();
    let mut unique: Vec<MarketPrice> = prices
        .into_iter()
        .filter(|p| seen.insert(p.dedup_key()))
        .collect();
    unique.sort_by(|a, b| b.date.cmp(&a.date));
    unique
}

/// Map a latitude to the state whose mandis are treated as "nearby"
pub fn region_for_coordinates(coords: &Coordinates) -> &'static str {
    let lat = coords.lat;
    if lat > 28.0 {
        "Delhi"
    } else if lat > 26.0 {
        "Punjab"
    } else if lat > 24.0 {
        "Rajasthan"
    } else if lat > 22.0 {
        "Gujarat"
    } else if lat > 20.0 {
        "Maharashtra"
    } else if lat > 18.0 {
        "Karnataka"
    } else if lat > 15.0 {
        "Andhra Pradesh"
    } else if lat > 12.0 {
        "Tamil Nadu"
    } else {
        "Kerala"
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Keep only quotes whose commodity matches one of the filters
pub fn filter_by_commodities(prices: Vec<MarketPrice>, commodities: &[String]) -> Vec<MarketPrice> {
    if commodities.is_empty() {
        return prices;
    }
    prices
        .into_iter()
        .filter(|p| commodities.iter().any(|c| contains_ci(&p.commodity, c)))
        .collect()
}

/// Quotes from the region around a point
pub fn nearby_prices(prices: &[MarketPrice], coords: &Coordinates, limit: usize) -> Vec<MarketPrice> {
    let region = region_for_coordinates(coords);
    prices
        .iter()
        .filter(|p| contains_ci(&p.state, region) || contains_ci(&p.market, region))
        .take(limit)
        .cloned()
        .collect()
}

/// Substring search over commodity, variety, market and state; at most ten hits
pub fn search_prices(prices: &[MarketPrice], query: &str) -> Vec<MarketPrice> {
    prices
        .iter()
        .filter(|p| {
            contains_ci(&p.commodity, query)
                || contains_ci(&p.variety, query)
                || contains_ci(&p.market, query)
                || contains_ci(&p.state, query)
        })
        .take(10)
        .cloned()
        .collect()
}

/// Quotes that moved by at least `threshold_percent`, largest move first
pub fn price_alerts(prices: &[MarketPrice], threshold_percent: Decimal) -> Vec<MarketPrice> {
    let mut alerts: Vec<MarketPrice> = prices
        .iter()
        .filter(|p| p.change_percent.abs() >= threshold_percent)
        .cloned()
        .collect();
    alerts.sort_by(|a, b| b.change_percent.abs().cmp(&a.change_percent.abs()));
    alerts.truncate(10);
    alerts
}

// ============================================================================
// Reference prices
// ============================================================================

struct ReferenceQuote {
    commodity: &'static str,
    variety: &'static str,
    state: &'static str,
    market: &'static str,
    price: i64,
    previous: i64,
}

const REFERENCE_QUOTES: &[ReferenceQuote] = &[
    ReferenceQuote { commodity: "Rice", variety: "Basmati", state: "Delhi", market: "Delhi Mandi", price: 2850, previous: 2780 },
    ReferenceQuote { commodity: "Rice", variety: "Common", state: "Jharkhand", market: "Ranchi Mandi", price: 2050, previous: 2050 },
    ReferenceQuote { commodity: "Wheat", variety: "Common", state: "Punjab", market: "Punjab Mandi", price: 2240, previous: 2180 },
    ReferenceQuote { commodity: "Tomato", variety: "Hybrid", state: "Karnataka", market: "Karnataka Mandi", price: 2200, previous: 2450 },
    ReferenceQuote { commodity: "Onion", variety: "Red", state: "Maharashtra", market: "Maharashtra Mandi", price: 1800, previous: 1650 },
    ReferenceQuote { commodity: "Potato", variety: "Common", state: "UP", market: "UP Mandi", price: 1200, previous: 1260 },
    ReferenceQuote { commodity: "Maize", variety: "Yellow", state: "Karnataka", market: "Karnataka Mandi", price: 1980, previous: 1950 },
    ReferenceQuote { commodity: "Cotton", variety: "Medium Staple", state: "Gujarat", market: "Gujarat Mandi", price: 5800, previous: 5900 },
    ReferenceQuote { commodity: "Turmeric", variety: "Salem", state: "Andhra Pradesh", market: "AP Mandi", price: 7800, previous: 7350 },
    ReferenceQuote { commodity: "Cumin", variety: "Common", state: "Gujarat", market: "Gujarat Mandi", price: 14500, previous: 15200 },
];

/// Static reference quotes used when the open-data feed is unavailable
pub fn reference_prices(commodities: &[String], date: NaiveDate) -> Vec<MarketPrice> {
    let quotes = REFERENCE_QUOTES
        .iter()
        .map(|q| {
            let price = Decimal::from(q.price);
            let previous = Some(Decimal::from(q.previous));
            MarketPrice {
                commodity: q.commodity.to_string(),
                variety: q.variety.to_string(),
                market: q.market.to_string(),
                state: q.state.to_string(),
                district: q.state.to_string(),
                price,
                previous_price: previous,
                unit: PRICE_UNIT.to_string(),
                date,
                trend: calculate_trend(price, previous),
                change_percent: calculate_change_percent(price, previous),
                min_price: price - Decimal::from(200),
                max_price: price + Decimal::from(200),
                source: DataSource::RegionalEstimate,
            }
        })
        .collect();

    filter_by_commodities(quotes, commodities)
}

//! data.gov.in commodity price client (AGMARKNET daily mandi prices)

use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    calculate_change_percent, calculate_trend, deduplicate_and_sort, DataSource, MarketPrice,
    PRICE_UNIT,
};

use super::{http_client, read_json, request_failed, PROVIDER_TIMEOUT};
use crate::config::{configured_key, MarketConfig};
use crate::error::{AppError, AppResult};

/// Maximum quotes kept from one feed response
pub const MAX_FEED_PRICES: usize = 50;

/// Commodity price API client
#[derive(Clone)]
pub struct MarketClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    resource_id: String,
}

#[derive(Debug, Deserialize)]
struct GovResponse {
    #[serde(default)]
    records: Vec<GovRecord>,
}

/// All fields arrive as strings
#[derive(Debug, Deserialize)]
struct GovRecord {
    state: Option<String>,
    district: Option<String>,
    market: Option<String>,
    commodity: Option<String>,
    variety: Option<String>,
    arrival_date: Option<String>,
    min_price: Option<String>,
    max_price: Option<String>,
    modal_price: Option<String>,
}

impl MarketClient {
    pub fn new(config: &MarketConfig) -> Self {
        Self {
            client: http_client(PROVIDER_TIMEOUT),
            api_key: configured_key(&config.api_key).map(String::from),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            resource_id: config.resource_id.clone(),
        }
    }

    /// Latest quotes, optionally restricted to one commodity
    pub async fn get_prices(&self, commodity: Option<&str>) -> AppResult<Vec<MarketPrice>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Market API key not configured".into()))?;

        let mut query = vec![("api-key", api_key), ("format", "json"), ("limit", "100")];
        if let Some(commodity) = commodity {
            query.push(("filters[commodity]", commodity));
        }

        let response = self
            .client
            .get(format!("{}/{}", self.base_url, self.resource_id))
            .query(&query)
            .send()
            .await
            .map_err(|e| request_failed("Market", e))?;

        let data: GovResponse = read_json(response, "Market").await?;
        let today = Utc::now().date_naive();
        let mut prices = deduplicate_and_sort(
            data.records
                .into_iter()
                .map(|record| convert_record(record, today))
                .collect(),
        );
        prices.truncate(MAX_FEED_PRICES);
        Ok(prices)
    }
}

fn parse_price(value: Option<&str>) -> Decimal {
    value
        .and_then(|v| Decimal::from_str(v.trim()).ok())
        .unwrap_or(Decimal::ZERO)
}

/// Arrival dates are `dd/mm/yyyy`
fn parse_arrival_date(value: Option<&str>, today: NaiveDate) -> NaiveDate {
    value
        .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%d/%m/%Y").ok())
        .unwrap_or(today)
}

fn convert_record(record: GovRecord, today: NaiveDate) -> MarketPrice {
    let price = parse_price(record.modal_price.as_deref());
    // The feed publishes one day at a time, so there is no previous quote
    let previous_price = None;

    MarketPrice {
        commodity: record.commodity.unwrap_or_else(|| "Unknown".to_string()),
        variety: record.variety.unwrap_or_else(|| "Common".to_string()),
        market: record.market.unwrap_or_else(|| "Unknown Mandi".to_string()),
        state: record.state.unwrap_or_else(|| "Unknown State".to_string()),
        district: record
            .district
            .unwrap_or_else(|| "Unknown District".to_string()),
        price,
        previous_price,
        unit: PRICE_UNIT.to_string(),
        date: parse_arrival_date(record.arrival_date.as_deref(), today),
        trend: calculate_trend(price, previous_price),
        change_percent: calculate_change_percent(price, previous_price),
        min_price: parse_price(record.min_price.as_deref()),
        max_price: parse_price(record.max_price.as_deref()),
        source: DataSource::Live,
    }
}

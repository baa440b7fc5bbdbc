use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::api::error::DomeError;
use crate::api::provider::MarketDataProvider;
use crate::models::{RawMarket, Venue};

pub const DOME_API_URL: &str = "https://api.domeapi.io/v1";

/// Price reported when the provider response carries no recognizable price field
const DEFAULT_PRICE: f64 = 0.5;

/// Client for the Dome REST API
#[derive(Clone)]
pub struct DomeClient {
    client: Client,
    base_url: String,
}

impl DomeClient {
    /// Create a new client authenticated with `api_key`
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, DomeError> {
        let mut headers = header::HeaderMap::new();
        let auth = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| DomeError::InvalidApiKey(e.to_string()))?;
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, DomeError> {
        let response = self.client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomeError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MarketDataProvider for DomeClient {
    async fn list_markets(&self, venue: Venue, limit: u32) -> Result<Vec<RawMarket>, DomeError> {
        let url = format!("{}/{}/markets", self.base_url, venue);
        debug!("Fetching {} markets from: {}", venue, url);

        let body = match self.get_json(&url, &[("limit", limit.to_string())]).await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to fetch {} markets: {}", venue, e);
                if e.is_unauthorized() {
                    log_auth_hints();
                }
                return Err(e);
            }
        };

        let markets = parse_markets(body, venue);
        info!("Dome returned {} {} markets", markets.len(), venue);
        Ok(markets)
    }

    async fn market_price(&self, token_id: &str) -> Result<f64, DomeError> {
        let url = format!(
            "{}/polymarket/market-price/{}",
            self.base_url,
            urlencoding::encode(token_id)
        );

        let body = self.get_json(&url, &[]).await?;
        extract_price(&body)
    }
}

fn log_auth_hints() {
    warn!("Dome authentication failed. Usually one of:");
    warn!("  1. DOME_API_KEY is incorrect or expired");
    warn!("  2. DOME_API_KEY is wrapped in quotes in the environment file");
    warn!("  3. The process was not restarted after changing the key");
}

/// Pull the market list out of a listing response.
///
/// Accepts a bare array, or an object holding the list under `markets`,
/// `data`, or failing those its first array-valued property. A successful
/// response with no list at all reads as zero markets.
fn extract_market_list(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in ["markets", "data"] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return items;
                }
            }

            let fallback_key = map
                .iter()
                .find(|(_, v)| v.is_array())
                .map(|(k, _)| k.clone());

            match fallback_key.and_then(|k| map.remove(&k).map(|v| (k, v))) {
                Some((key, Value::Array(items))) => {
                    debug!("Found markets in property: {}", key);
                    items
                }
                _ => {
                    warn!("Markets response object holds no array, treating as empty");
                    Vec::new()
                }
            }
        }
        other => {
            warn!("Markets response is {}, treating as empty", json_kind(&other));
            Vec::new()
        }
    }
}

pub(crate) fn parse_markets(body: Value, venue: Venue) -> Vec<RawMarket> {
    let items = extract_market_list(body);
    let total = items.len();

    let markets: Vec<RawMarket> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawMarket>(item) {
            Ok(mut market) => {
                market.venue = venue;
                Some(market)
            }
            Err(e) => {
                debug!("Skipping unparseable {} market: {}", venue, e);
                None
            }
        })
        .collect();

    if markets.len() < total {
        warn!(
            "Dropped {} of {} {} markets that did not parse",
            total - markets.len(),
            total,
            venue
        );
    }

    markets
}

/// YES probability from a market-price response.
///
/// A response without a recognizable price field reads as `DEFAULT_PRICE`;
/// a price outside [0, 1] is rejected.
fn extract_price(body: &Value) -> Result<f64, DomeError> {
    let price = body.as_f64().unwrap_or_else(|| {
        ["price", "yesPrice", "probability", "yes_price"]
            .iter()
            .filter_map(|key| body.get(key))
            .find_map(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            })
            .unwrap_or(DEFAULT_PRICE)
    });

    if !(0.0..=1.0).contains(&price) {
        return Err(DomeError::UnexpectedShape(format!("price {} outside [0, 1]", price)));
    }

    Ok(price)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_market_list_shapes() {
        let bare = json!([{"condition_id": "a"}, {"condition_id": "b"}]);
        assert_eq!(extract_market_list(bare).len(), 2);

        let wrapped = json!({"markets": [{"condition_id": "a"}], "pagination": {"limit": 1}});
        assert_eq!(extract_market_list(wrapped).len(), 1);

        let data = json!({"data": [{"id": "x"}, {"id": "y"}, {"id": "z"}]});
        assert_eq!(extract_market_list(data).len(), 3);

        let other = json!({"total": 1, "results": [{"id": "x"}]});
        assert_eq!(extract_market_list(other).len(), 1);
    }

    #[test]
    fn test_market_list_without_array_is_empty() {
        assert!(extract_market_list(json!({"count": 0})).is_empty());
        assert!(extract_market_list(json!({})).is_empty());
        assert!(extract_market_list(Value::Null).is_empty());
        assert!(extract_market_list(json!("nope")).is_empty());
    }

    #[test]
    fn test_parse_markets_tags_venue_and_skips_bad_records() {
        let body = json!({"markets": [
            {"ticker": "KXFED-25", "title": "Fed cut?"},
            {"side_a": "not-an-object"},
        ]});
        let markets = parse_markets(body, Venue::Kalshi);
        assert_eq!(markets.len(), 1);
        assert_eq!(markets[0].venue, Venue::Kalshi);
        assert_eq!(markets[0].market_id(), "KXFED-25");
    }

    #[test]
    fn test_extract_price() {
        assert_eq!(extract_price(&json!({"price": 0.73, "at_time": 1})).unwrap(), 0.73);
        assert_eq!(extract_price(&json!({"yesPrice": 0.2})).unwrap(), 0.2);
        assert_eq!(
            extract_price(&json!({"price": null, "probability": 0.41})).unwrap(),
            0.41
        );
        assert_eq!(extract_price(&json!({"yes_price": "0.66"})).unwrap(), 0.66);
        assert_eq!(extract_price(&json!(0.12)).unwrap(), 0.12);
        assert_eq!(extract_price(&json!({"foo": 1})).unwrap(), DEFAULT_PRICE);
        assert_eq!(extract_price(&json!({"price": 1})).unwrap(), 1.0);
    }

    #[test]
    fn test_extract_price_rejects_out_of_range() {
        for body in [
            json!({"price": 1.5}),
            json!({"price": -0.1}),
            json!(73),
            json!({"price": "NaN"}),
            json!({"yes_price": "inf"}),
        ] {
            assert!(
                matches!(extract_price(&body), Err(DomeError::UnexpectedShape(_))),
                "accepted {}",
                body
            );
        }
    }

    #[test]
    fn test_client_rejects_unprintable_key() {
        assert!(matches!(
            DomeClient::new(DOME_API_URL, "bad\nkey"),
            Err(DomeError::InvalidApiKey(_))
        ));
    }
}

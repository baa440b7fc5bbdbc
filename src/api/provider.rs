use async_trait::async_trait;

use crate::api::error::DomeError;
use crate::models::{RawMarket, Venue};

/// Market listings and prices the signal pipeline consumes
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// List markets for a venue. Every returned record is tagged with `venue`.
    async fn list_markets(&self, venue: Venue, limit: u32) -> Result<Vec<RawMarket>, DomeError>;

    /// Current YES probability for an outcome token
    async fn market_price(&self, token_id: &str) -> Result<f64, DomeError>;
}

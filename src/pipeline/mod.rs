pub mod events;
pub mod log_once;
pub mod metrics;
pub mod positions;
pub mod sample;

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::api::{MarketDataProvider, WalletAnalyticsSource};
use crate::models::{DashboardData, MarketDetail, MarketRow, RawMarket, Venue, WalletAnalytics};

pub use events::generate_signal_events;
pub use log_once::LogOnce;
pub use sample::sample_dashboard_data;

/// Price the feed reports for markets it could not resolve
pub const UNRESOLVED_PRICE: f64 = 0.5;

/// Turns provider listings and wallet analytics into dashboard data
pub struct DashboardPipeline {
    provider: Arc<dyn MarketDataProvider>,
    wallets: Arc<dyn WalletAnalyticsSource>,
    venues: Vec<Venue>,
    market_limit: u32,
    unknown_ids: LogOnce,
}

impl DashboardPipeline {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        wallets: Arc<dyn WalletAnalyticsSource>,
        venues: Vec<Venue>,
        market_limit: u32,
    ) -> Self {
        Self {
            provider,
            wallets,
            venues,
            market_limit,
            unknown_ids: LogOnce::new(),
        }
    }

    /// Compute the dashboard as of the local wall clock
    pub async fn get_dashboard_data(&self) -> DashboardData {
        self.compute(Local::now().naive_local()).await
    }

    /// Compute the dashboard with event times relative to `now`.
    ///
    /// Never fails: an unreachable feed yields the sample dataset, and
    /// per-market lookup failures only drop or zero that market.
    pub async fn compute(&self, now: NaiveDateTime) -> DashboardData {
        let markets = match self.fetch_markets().await {
            Some(markets) => markets,
            None => {
                warn!("Market feed unavailable, falling back to sample data");
                return sample_dashboard_data(now);
            }
        };

        info!("Processing {} markets", markets.len());

        let (prices, analytics) = tokio::join!(
            join_all(markets.iter().map(|m| self.resolve_price(m))),
            join_all(markets.iter().map(|m| self.wallet_analytics(m))),
        );

        let priced = prices.iter().filter(|p| p.is_some()).count();
        info!("Resolved prices for {}/{} markets", priced, markets.len());

        let rows: Vec<MarketRow> = markets
            .iter()
            .zip(prices)
            .zip(analytics.iter())
            .filter_map(|((market, price), analytics)| {
                price.map(|p| metrics::build_row(market, analytics, p))
            })
            .collect();

        let rows = rank_rows(rows);
        info!(
            "Ranked {} markets with valid prices (removed {} without prices)",
            rows.len(),
            markets.len() - rows.len(),
        );
        for row in &rows {
            debug!(
                "{} {} {} alignment {:.2} ({})",
                row.venue.as_str(),
                row.id,
                row.smart_side.as_str(),
                row.sharp_alignment,
                row.signal_tag.as_str()
            );
        }

        let signal_events = generate_signal_events(&rows, now);

        DashboardData {
            markets: rows,
            signal_events,
        }
    }

    /// Sharp-wallet positions behind a dashboard row, one per counted wallet
    pub fn market_detail(&self, row: MarketRow) -> MarketDetail {
        let counts =
            WalletAnalytics::new(row.wallet_counts.yes_sharps, row.wallet_counts.no_sharps);
        let positions = positions::positions_from_analytics(&row.id, &counts);

        MarketDetail {
            row,
            sharp_wallet_positions: positions,
        }
    }

    /// Markets from every configured venue, or None when every venue failed
    async fn fetch_markets(&self) -> Option<Vec<RawMarket>> {
        let results = join_all(
            self.venues
                .iter()
                .map(|&venue| self.provider.list_markets(venue, self.market_limit)),
        )
        .await;

        let mut markets = Vec::new();
        let mut any_ok = false;

        for (venue, result) in self.venues.iter().zip(results) {
            match result {
                Ok(venue_markets) => {
                    info!("{} markets: {} (success)", venue, venue_markets.len());
                    any_ok = true;
                    markets.extend(venue_markets);
                }
                Err(e) => {
                    warn!("{} market fetch failed: {}", venue, e);
                }
            }
        }

        any_ok.then_some(markets)
    }

    /// YES price for a market, None when it cannot be resolved
    async fn resolve_price(&self, market: &RawMarket) -> Option<f64> {
        let market_id = market.market_id();

        if market.venue != Venue::Polymarket {
            debug!("No price source for {} market {}", market.venue, market_id);
            return None;
        }

        let Some(token_id) = market.yes_token_id() else {
            debug!("No outcome token_id for market {}, leaving unpriced", market_id);
            return None;
        };

        if token_id.starts_with("0x") {
            debug!("Skipping hex token_id for market {}, leaving unpriced", market_id);
            return None;
        }

        match self.provider.market_price(&token_id).await {
            Ok(price) => {
                debug!(
                    "Price for market {} (token_id {}): {}",
                    market_id, token_id, price
                );
                Some(price)
            }
            Err(e) => {
                warn!(
                    "Error fetching price for {} (token_id {}): {}",
                    market_id, token_id, e
                );
                None
            }
        }
    }

    /// Wallet analytics for a market, zero counts on failure
    async fn wallet_analytics(&self, market: &RawMarket) -> WalletAnalytics {
        let market_id = market.market_id();

        if market_id == "unknown" {
            let key = format!("{}:{}", market.venue, market_id);
            if self.unknown_ids.first_time(&key) {
                info!("Fetching wallet analytics for {} market with no id", market.venue);
            }
        } else {
            debug!("Fetching wallet analytics for {} market {}", market.venue, market_id);
        }

        match self.wallets.analytics(market_id, market.venue).await {
            Ok(analytics) => analytics,
            Err(e) => {
                warn!(
                    "Error fetching wallet analytics for {} market {}: {}",
                    market.venue, market_id, e
                );
                WalletAnalytics::default()
            }
        }
    }
}

/// Drop unresolved prices and order by alignment, highest first.
///
/// The sort is stable, so equal alignments keep feed order.
pub fn rank_rows(rows: Vec<MarketRow>) -> Vec<MarketRow> {
    let mut rows: Vec<MarketRow> = rows
        .into_iter()
        .filter(|r| r.price != UNRESOLVED_PRICE)
        .collect();
    rows.sort_by(|a, b| b.sharp_alignment.total_cmp(&a.sharp_alignment));
    rows
}

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::models::{Venue, WalletAnalytics};

/// Source of per-market sharp-wallet positioning
#[async_trait]
pub trait WalletAnalyticsSource: Send + Sync {
    async fn analytics(&self, market_id: &str, venue: Venue) -> anyhow::Result<WalletAnalytics>;
}

/// Stand-in until a real sharp-wallet feed exists.
///
/// Draws 1-10 YES sharps and 0-4 NO sharps per call, with no recent activity.
pub struct MockWalletAnalytics {
    rng: Mutex<StdRng>,
}

impl MockWalletAnalytics {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic draws for tests and demos
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for MockWalletAnalytics {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletAnalyticsSource for MockWalletAnalytics {
    async fn analytics(&self, market_id: &str, venue: Venue) -> anyhow::Result<WalletAnalytics> {
        debug!("Generating mock wallet analytics for {} market {}", venue, market_id);

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let yes_sharps = rng.gen_range(1..=10);
        let no_sharps = rng.gen_range(0..=4);

        Ok(WalletAnalytics::new(yes_sharps, no_sharps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_ranges() {
        let source = MockWalletAnalytics::seeded(7);

        for i in 0..200 {
            let a = source
                .analytics(&format!("m{}", i), Venue::Polymarket)
                .await
                .unwrap();
            assert!((1..=10).contains(&a.yes_sharps));
            assert!((0..=4).contains(&a.no_sharps));
            assert!(a.recent_activity.is_empty());
        }
    }

    #[tokio::test]
    async fn test_seeded_is_deterministic() {
        let a = MockWalletAnalytics::seeded(42);
        let b = MockWalletAnalytics::seeded(42);

        for _ in 0..10 {
            let x = a.analytics("m", Venue::Polymarket).await.unwrap();
            let y = b.analytics("m", Venue::Polymarket).await.unwrap();
            assert_eq!(x, y);
        }
    }
}

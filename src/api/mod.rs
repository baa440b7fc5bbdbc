pub mod dome;
pub mod error;
pub mod provider;
pub mod wallets;

pub use dome::DomeClient;
pub use error::DomeError;
pub use provider::MarketDataProvider;
pub use wallets::{MockWalletAnalytics, WalletAnalyticsSource};

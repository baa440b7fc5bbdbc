use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::market::MarketRow;
use super::signal::SmartSide;

/// Sharp-wallet aggregate for one market
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletAnalytics {
    /// Sharp wallets positioned YES
    pub yes_sharps: u32,

    /// Sharp wallets positioned NO
    pub no_sharps: u32,

    /// Most recent sharp-wallet entries, newest first
    pub recent_activity: Vec<WalletActivity>,
}

impl WalletAnalytics {
    pub fn new(yes_sharps: u32, no_sharps: u32) -> Self {
        Self {
            yes_sharps,
            no_sharps,
            recent_activity: Vec::new(),
        }
    }

    pub fn total_sharps(&self) -> u32 {
        self.yes_sharps + self.no_sharps
    }
}

/// A sharp wallet entering a position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletActivity {
    pub wallet_address: String,
    pub side: SmartSide,
    pub timestamp: DateTime<Utc>,
}

/// Historical skill bucket of a tracked wallet
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WalletTier {
    S,
    A,
    B,
    C,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharpWalletPosition {
    pub wallet_address: String,
    pub side: SmartSide,
    pub tier: WalletTier,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_size: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnl: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharpWalletPositions {
    pub yes: Vec<SharpWalletPosition>,
    pub no: Vec<SharpWalletPosition>,
}

/// Market row expanded with the individual sharp positions behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDetail {
    #[serde(flatten)]
    pub row: MarketRow,
    pub sharp_wallet_positions: SharpWalletPositions,
}

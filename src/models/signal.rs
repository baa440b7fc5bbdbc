use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::market::MarketRow;

/// Side the sharp-wallet majority sits on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SmartSide {
    Yes,
    No,
}

impl SmartSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmartSide::Yes => "YES",
            SmartSide::No => "NO",
        }
    }
}

/// Coarse classification of a market's sharp-wallet conviction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SignalTag {
    /// Near-unanimous sharps with a burst of recent activity
    #[serde(rename = "PRE-MOVE")]
    PreMove,
    /// Split or thin sharp positioning
    #[serde(rename = "ANOMALY")]
    Anomaly,
    #[serde(rename = "NORMAL")]
    Normal,
}

impl SignalTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalTag::PreMove => "PRE-MOVE",
            SignalTag::Anomaly => "ANOMALY",
            SignalTag::Normal => "NORMAL",
        }
    }
}

/// Line in the dashboard's signal feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalEvent {
    /// Wall-clock time, "HH:MM:SS"
    pub time: String,

    /// Headline, e.g. "SHARP POSITION"
    pub text: String,

    /// e.g. " / POLY-ETH-VOL / "
    pub detail: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,

    pub color: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<String>,
}

/// Everything the dashboard renders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub markets: Vec<MarketRow>,
    pub signal_events: Vec<SignalEvent>,
}

/// Dashboard data plus the time it was computed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    #[serde(flatten)]
    pub data: DashboardData,
    pub generated_at: DateTime<Utc>,
}

/// Most recent snapshot, None until the first computation finishes
pub type LatestSnapshot = Option<DashboardSnapshot>;

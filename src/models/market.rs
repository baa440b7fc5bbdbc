use serde::{Deserialize, Deserializer, Serialize};

use super::signal::{SignalTag, SmartSide};

/// Prediction-market platform a record was fetched from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    #[default]
    Polymarket,
    Kalshi,
}

impl Venue {
    /// Path segment used by the market-data provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Venue::Polymarket => "polymarket",
            Venue::Kalshi => "kalshi",
        }
    }

    /// Short code shown in the dashboard table
    pub fn code(&self) -> VenueCode {
        match self {
            Venue::Polymarket => VenueCode::Poly,
            Venue::Kalshi => VenueCode::Kal,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polymarket" | "poly" => Some(Venue::Polymarket),
            "kalshi" | "kal" => Some(Venue::Kalshi),
            _ => None,
        }
    }
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VenueCode {
    #[serde(rename = "POLY")]
    Poly,
    #[serde(rename = "KAL")]
    Kal,
}

impl VenueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenueCode::Poly => "POLY",
            VenueCode::Kal => "KAL",
        }
    }
}

/// Reference to an outcome token. Venues disagree on whether ids are strings or numbers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutcomeRef {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

impl OutcomeRef {
    fn id_string(&self) -> Option<String> {
        match self.id.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Market record as listed by the upstream provider.
///
/// The field set is the union of what Polymarket and Kalshi listings carry;
/// everything is optional and resolved through the accessor methods.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMarket {
    /// Venue the record was fetched from. Set by the provider, never by the payload.
    #[serde(skip)]
    pub venue: Venue,

    #[serde(default, deserialize_with = "string_or_number")]
    pub condition_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub ticker: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub market_slug: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: Option<String>,

    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub question: Option<String>,

    #[serde(default, alias = "sideA")]
    pub side_a: Option<OutcomeRef>,
    #[serde(default, deserialize_with = "outcome_list")]
    pub outcomes: Option<Vec<OutcomeRef>>,
    #[serde(default, deserialize_with = "outcome_list")]
    pub sides: Option<Vec<OutcomeRef>>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Outcome arrays of objects are kept; anything else (Gamma-style JSON strings,
/// label lists) is ignored.
fn outcome_list<'de, D>(deserializer: D) -> Result<Option<Vec<OutcomeRef>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl RawMarket {
    /// An empty record for the given venue
    pub fn new(venue: Venue) -> Self {
        Self {
            venue,
            condition_id: None,
            id: None,
            ticker: None,
            slug: None,
            market_slug: None,
            name: None,
            title: None,
            question: None,
            side_a: None,
            outcomes: None,
            sides: None,
        }
    }

    /// First non-empty identifier candidate, or `"unknown"`
    pub fn market_id(&self) -> &str {
        non_empty(&self.condition_id)
            .or_else(|| non_empty(&self.id))
            .or_else(|| non_empty(&self.ticker))
            .or_else(|| non_empty(&self.slug))
            .or_else(|| non_empty(&self.market_slug))
            .or_else(|| non_empty(&self.name))
            .unwrap_or("unknown")
    }

    pub fn question_text(&self) -> &str {
        non_empty(&self.title)
            .or_else(|| non_empty(&self.question))
            .or_else(|| non_empty(&self.name))
            .unwrap_or("Unknown Market")
    }

    /// Token id of the YES outcome, if the record carries one
    pub fn yes_token_id(&self) -> Option<String> {
        self.side_a
            .as_ref()
            .and_then(OutcomeRef::id_string)
            .or_else(|| {
                self.outcomes
                    .as_ref()
                    .and_then(|o| o.first())
                    .and_then(OutcomeRef::id_string)
            })
            .or_else(|| {
                self.sides
                    .as_ref()
                    .and_then(|s| s.first())
                    .and_then(OutcomeRef::id_string)
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharpAlignmentBreakdown {
    pub yes_count: u32,
    pub no_count: u32,
    pub total_sharps: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletCounts {
    pub yes_sharps: u32,
    pub no_sharps: u32,
}

impl WalletCounts {
    pub fn total(&self) -> u32 {
        self.yes_sharps + self.no_sharps
    }
}

/// Display-ready dashboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRow {
    pub id: String,
    pub question: String,
    pub venue: VenueCode,

    /// Current YES probability (0.0 - 1.0)
    pub price: f64,

    pub smart_side: SmartSide,

    /// Share of sharp wallets on the majority side (0.0 - 1.0)
    pub sharp_alignment: f64,

    pub sharp_alignment_breakdown: SharpAlignmentBreakdown,
    pub wallet_counts: WalletCounts,

    /// e.g. "+6 wallets / 2h"
    pub net_flow: String,

    pub signal_tag: SignalTag,
}

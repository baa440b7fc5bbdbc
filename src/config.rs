use std::env;

use anyhow::{bail, Context, Result};
use tracing::warn;

use crate::api::dome::DOME_API_URL;
use crate::models::Venue;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Dome API bearer credential
    pub dome_api_key: String,

    /// Dome REST base URL
    pub dome_api_url: String,

    /// Venues whose markets feed the dashboard
    pub venues: Vec<Venue>,

    /// Markets requested per venue
    pub market_limit: u32,

    /// Interval in seconds between dashboard recomputations
    pub revalidate_secs: u64,

    /// Port for the JSON API
    pub api_port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let raw_key = env::var("DOME_API_KEY").context(
            "Missing DOME_API_KEY environment variable. Add DOME_API_KEY=your-api-key to .env",
        )?;

        Ok(Config {
            dome_api_key: clean_api_key(&raw_key)?,

            dome_api_url: env::var("DOME_API_URL").unwrap_or_else(|_| DOME_API_URL.to_string()),

            venues: parse_venues(
                &env::var("DASHBOARD_VENUES").unwrap_or_else(|_| "polymarket".to_string()),
            )?,

            market_limit: env::var("MARKET_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .context("MARKET_LIMIT must be a valid number")?,

            revalidate_secs: parse_revalidate_secs(
                &env::var("REVALIDATE_SECS").unwrap_or_else(|_| "15".to_string()),
            )?,

            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("API_PORT must be a valid port number")?,
        })
    }

    /// Key length and prefix, safe to log
    pub fn api_key_summary(&self) -> String {
        let prefix: String = self.dome_api_key.chars().take(10).collect();
        format!("{} chars, prefix: {}...", self.dome_api_key.len(), prefix)
    }
}

/// Strip one pair of surrounding quotes and whitespace
fn clean_api_key(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let quotes: &[char] = &['"', '\''];
    let unquoted = trimmed.strip_prefix(quotes).unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix(quotes).unwrap_or(unquoted);
    let key = unquoted.trim().to_string();

    if key.is_empty() {
        bail!("DOME_API_KEY is empty");
    }
    if key == "code" {
        warn!(
            "DOME_API_KEY looks like the placeholder 'code'; replace it with a real Dome API key"
        );
    }

    Ok(key)
}

fn parse_venues(raw: &str) -> Result<Vec<Venue>> {
    let mut venues = Vec::new();

    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let venue = Venue::parse(name)
            .with_context(|| format!("Unknown venue in DASHBOARD_VENUES: {}", name))?;
        if !venues.contains(&venue) {
            venues.push(venue);
        }
    }

    if venues.is_empty() {
        bail!("DASHBOARD_VENUES must name at least one venue");
    }

    Ok(venues)
}

fn parse_revalidate_secs(raw: &str) -> Result<u64> {
    let secs: u64 = raw
        .trim()
        .parse()
        .context("REVALIDATE_SECS must be a valid number")?;
    if secs == 0 {
        bail!("REVALIDATE_SECS must be at least 1");
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_api_key() {
        assert_eq!(clean_api_key("abc-123").unwrap(), "abc-123");
        assert_eq!(clean_api_key("  \"abc-123\" ").unwrap(), "abc-123");
        assert_eq!(clean_api_key("'abc-123'").unwrap(), "abc-123");
        assert!(clean_api_key("\"\"").is_err());
        assert!(clean_api_key("   ").is_err());
    }

    #[test]
    fn test_parse_venues() {
        assert_eq!(parse_venues("polymarket").unwrap(), vec![Venue::Polymarket]);
        assert_eq!(
            parse_venues("kalshi, polymarket,kalshi").unwrap(),
            vec![Venue::Kalshi, Venue::Polymarket]
        );
        assert!(parse_venues("").is_err());
        assert!(parse_venues("polymarket,betfair").is_err());
    }

    #[test]
    fn test_parse_revalidate_secs() {
        assert_eq!(parse_revalidate_secs("15").unwrap(), 15);
        assert_eq!(parse_revalidate_secs(" 60 ").unwrap(), 60);
        assert!(parse_revalidate_secs("0").is_err());
        assert!(parse_revalidate_secs("-5").is_err());
        assert!(parse_revalidate_secs("soon").is_err());
    }
}

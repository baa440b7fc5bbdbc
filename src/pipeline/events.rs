use chrono::{Duration, NaiveDateTime};

use crate::models::{MarketRow, SignalEvent, SignalTag};
use crate::pipeline::metrics::HIGH_ALIGNMENT;

/// Ranked rows that can emit events
pub const EVENT_SOURCE_ROWS: usize = 5;

/// Feed length cap
pub const MAX_EVENTS: usize = 7;

pub const EVENT_COLOR: &str = "#4a9eb8";
pub const HIGHLIGHT_COLOR: &str = "#ff8800";

/// "HH:MM:SS", 24h clock
pub fn format_time(t: NaiveDateTime) -> String {
    t.format("%H:%M:%S").to_string()
}

/// Short market label, e.g. "POLY-WILL-TAYLO"
fn market_label(row: &MarketRow) -> String {
    let head: String = row
        .question
        .chars()
        .take(10)
        .collect::<String>()
        .to_uppercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    format!("{}-{}", row.venue.as_str(), head)
}

/// Build the signal feed from ranked rows.
///
/// Sorted by the raw time string, newest first. Times are wall-clock strings,
/// so events straddling midnight sort by text, not chronology.
pub fn generate_signal_events(rows: &[MarketRow], now: NaiveDateTime) -> Vec<SignalEvent> {
    let mut events = Vec::new();
    let now_str = format_time(now);
    let earlier_str = format_time(now - Duration::minutes(5));

    for row in rows.iter().take(EVENT_SOURCE_ROWS) {
        let total = row.wallet_counts.total();

        if row.sharp_alignment >= HIGH_ALIGNMENT {
            events.push(SignalEvent {
                time: now_str.clone(),
                text: "SHARP POSITION".to_string(),
                detail: format!(" / {} / ", market_label(row)),
                highlight: Some(format!("+{} wallets", total)),
                color: EVENT_COLOR.to_string(),
                highlight_color: Some(HIGHLIGHT_COLOR.to_string()),
            });
        }

        if row.signal_tag == SignalTag::PreMove {
            events.push(SignalEvent {
                time: earlier_str.clone(),
                text: "CLUSTER EXPANSION".to_string(),
                detail: format!(
                    " / {} → {} WALLETS",
                    i64::from(total) - 2,
                    total
                ),
                highlight: Some(String::new()),
                color: EVENT_COLOR.to_string(),
                highlight_color: None,
            });
        }
    }

    // stable, so same-time events keep row order
    events.sort_by(|a, b| b.time.cmp(&a.time));
    events.truncate(MAX_EVENTS);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SharpAlignmentBreakdown, SmartSide, VenueCode, WalletCounts};
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn row(question: &str, yes: u32, no: u32, alignment: f64, tag: SignalTag) -> MarketRow {
        MarketRow {
            id: question.to_lowercase(),
            question: question.to_string(),
            venue: VenueCode::Poly,
            price: 0.6,
            smart_side: SmartSide::Yes,
            sharp_alignment: alignment,
            sharp_alignment_breakdown: SharpAlignmentBreakdown {
                yes_count: yes,
                no_count: no,
                total_sharps: yes + no,
            },
            wallet_counts: WalletCounts {
                yes_sharps: yes,
                no_sharps: no,
            },
            net_flow: String::new(),
            signal_tag: tag,
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(at(9, 5, 7)), "09:05:07");
        assert_eq!(format_time(at(23, 59, 0)), "23:59:00");
    }

    #[test]
    fn test_sharp_position_event() {
        let rows = vec![row("Will ETH vol spike?", 9, 1, 0.9, SignalTag::Normal)];
        let events = generate_signal_events(&rows, at(13, 7, 12));

        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.time, "13:07:12");
        assert_eq!(e.text, "SHARP POSITION");
        assert_eq!(e.detail, " / POLY-WILL-ETH-V / ");
        assert_eq!(e.highlight.as_deref(), Some("+10 wallets"));
        assert_eq!(e.color, EVENT_COLOR);
        assert_eq!(e.highlight_color.as_deref(), Some(HIGHLIGHT_COLOR));
    }

    #[test]
    fn test_pre_move_emits_cluster_expansion_five_minutes_earlier() {
        let rows = vec![row("Grammys", 9, 0, 1.0, SignalTag::PreMove)];
        let events = generate_signal_events(&rows, at(13, 7, 12));

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].text, "SHARP POSITION");
        assert_eq!(events[1].text, "CLUSTER EXPANSION");
        assert_eq!(events[1].time, "13:02:12");
        assert_eq!(events[1].detail, " / 7 → 9 WALLETS");
        assert_eq!(events[1].highlight_color, None);
    }

    #[test]
    fn test_low_alignment_rows_emit_nothing() {
        let rows = vec![row("Quiet", 5, 3, 0.625, SignalTag::Anomaly)];
        assert!(generate_signal_events(&rows, at(10, 0, 0)).is_empty());
    }

    #[test]
    fn test_only_top_five_rows_and_cap_of_seven() {
        let rows: Vec<MarketRow> = (0..8)
            .map(|i| row(&format!("Market {}", i), 10, 0, 1.0, SignalTag::PreMove))
            .collect();
        let events = generate_signal_events(&rows, at(12, 0, 0));

        // 5 rows x 2 events, capped
        assert_eq!(events.len(), MAX_EVENTS);
        assert!(events.windows(2).all(|w| w[0].time >= w[1].time));
        assert_eq!(
            events.iter().filter(|e| e.text == "SHARP POSITION").count(),
            5
        );
        assert!(events.iter().all(|e| !e.detail.contains("MARKET-5")));
    }

    #[test]
    fn test_ordering_is_by_time_string() {
        // 00:02 - 5 min wraps to 23:57, which sorts ahead of 00:02 as text
        let rows = vec![row("Midnight", 10, 0, 1.0, SignalTag::PreMove)];
        let events = generate_signal_events(&rows, at(0, 2, 0));

        assert_eq!(events[0].time, "23:57:00");
        assert_eq!(events[0].text, "CLUSTER EXPANSION");
        assert_eq!(events[1].time, "00:02:00");
    }
}

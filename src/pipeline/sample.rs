use chrono::{Duration, NaiveDateTime};

use crate::models::{
    DashboardData, MarketRow, SharpAlignmentBreakdown, SignalEvent, SignalTag, SmartSide,
    VenueCode, WalletCounts,
};
use crate::pipeline::events::{format_time, EVENT_COLOR, HIGHLIGHT_COLOR};

#[allow(clippy::too_many_arguments)]
fn sample_row(
    id: &str,
    question: &str,
    price: f64,
    alignment: f64,
    yes: u32,
    no: u32,
    net_flow: &str,
    tag: SignalTag,
) -> MarketRow {
    MarketRow {
        id: id.to_string(),
        question: question.to_string(),
        venue: VenueCode::Poly,
        price,
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
        net_flow: net_flow.to_string(),
        signal_tag: tag,
    }
}

/// Fixed demo content served when the market feed is unreachable
pub fn sample_dashboard_data(now: NaiveDateTime) -> DashboardData {
    let markets = vec![
        sample_row(
            "sample-1",
            "Will Taylor Swift win Album of the Year at 2025 Grammys?",
            0.73,
            0.93,
            7,
            1,
            "+6 wallets / 2h",
            SignalTag::PreMove,
        ),
        sample_row(
            "sample-2",
            "Will Dune: Part Two win Best Picture at 2025 Oscars?",
            0.58,
            0.87,
            5,
            2,
            "+3 wallets / 4h",
            SignalTag::Anomaly,
        ),
        sample_row(
            "sample-3",
            "Will Stranger Things Season 5 premiere before June 2025?",
            0.42,
            0.91,
            8,
            1,
            "+7 wallets / 1h",
            SignalTag::PreMove,
        ),
        sample_row(
            "sample-4",
            "Will Beyoncé release a new album in 2025?",
            0.65,
            0.82,
            6,
            2,
            "+4 wallets / 5h",
            SignalTag::Normal,
        ),
    ];

    let signal_events = vec![
        SignalEvent {
            time: format_time(now - Duration::minutes(5)),
            text: "SHARP POSITION".to_string(),
            detail: " / POLY-ETH-VOL / ".to_string(),
            highlight: Some("+$47K".to_string()),
            color: EVENT_COLOR.to_string(),
            highlight_color: Some(HIGHLIGHT_COLOR.to_string()),
        },
        SignalEvent {
            time: format_time(now - Duration::minutes(4)),
            text: "CLUSTER EXPANSION".to_string(),
            detail: " / 3 → 5 WALLETS".to_string(),
            highlight: Some(String::new()),
            color: EVENT_COLOR.to_string(),
            highlight_color: None,
        },
        SignalEvent {
            time: format_time(now - Duration::minutes(3)),
            text: "WALLET SYNC DETECTED".to_string(),
            detail: " / 0x2E8F… ⇄ 0x7A1B…".to_string(),
            highlight: Some(String::new()),
            color: "#00d9ff".to_string(),
            highlight_color: None,
        },
    ];

    DashboardData {
        markets,
        signal_events,
    }
}

use crate::models::{
    MarketRow, RawMarket, SharpAlignmentBreakdown, SignalTag, SmartSide, WalletAnalytics,
    WalletCounts,
};

/// Alignment at or above which a market counts as near-unanimous
pub const HIGH_ALIGNMENT: f64 = 0.9;

/// Alignment below which positioning is considered split
pub const LOW_ALIGNMENT: f64 = 0.7;

/// Recent entries needed (strictly more than) to call a pre-move
pub const PRE_MOVE_MIN_ACTIVITY: usize = 3;

/// Lookback window quoted in the net-flow string
pub const NET_FLOW_WINDOW: &str = "2h";

/// `max(yes, no) / total`, or 0 with no sharps
pub fn sharp_alignment(analytics: &WalletAnalytics) -> f64 {
    let total = analytics.total_sharps();
    if total == 0 {
        return 0.0;
    }
    analytics.yes_sharps.max(analytics.no_sharps) as f64 / total as f64
}

/// Ties go to NO
pub fn smart_side(analytics: &WalletAnalytics) -> SmartSide {
    if analytics.yes_sharps > analytics.no_sharps {
        SmartSide::Yes
    } else {
        SmartSide::No
    }
}

fn wallet_gap(analytics: &WalletAnalytics) -> u32 {
    analytics.yes_sharps.abs_diff(analytics.no_sharps)
}

/// e.g. "+6 wallets / 2h"
pub fn net_flow(analytics: &WalletAnalytics) -> String {
    let sign = if analytics.yes_sharps >= analytics.no_sharps {
        "+"
    } else {
        "-"
    };
    format!(
        "{}{} wallets / {}",
        sign,
        wallet_gap(analytics),
        NET_FLOW_WINDOW
    )
}

/// Rules are checked in order: PRE-MOVE, then ANOMALY, else NORMAL.
pub fn signal_tag(alignment: f64, analytics: &WalletAnalytics) -> SignalTag {
    if alignment >= HIGH_ALIGNMENT && analytics.recent_activity.len() > PRE_MOVE_MIN_ACTIVITY {
        return SignalTag::PreMove;
    }
    if alignment < LOW_ALIGNMENT || wallet_gap(analytics) <= 1 {
        return SignalTag::Anomaly;
    }
    SignalTag::Normal
}

/// Assemble a dashboard row from a market, its analytics and its resolved price
pub fn build_row(market: &RawMarket, analytics: &WalletAnalytics, price: f64) -> MarketRow {
    let alignment = sharp_alignment(analytics);

    MarketRow {
        id: market.market_id().to_string(),
        question: market.question_text().to_string(),
        venue: market.venue.code(),
        price,
        smart_side: smart_side(analytics),
        sharp_alignment: alignment,
        sharp_alignment_breakdown: SharpAlignmentBreakdown {
            yes_count: analytics.yes_sharps,
            no_count: analytics.no_sharps,
            total_sharps: analytics.total_sharps(),
        },
        wallet_counts: WalletCounts {
            yes_sharps: analytics.yes_sharps,
            no_sharps: analytics.no_sharps,
        },
        net_flow: net_flow(analytics),
        signal_tag: signal_tag(alignment, analytics),
    }
}

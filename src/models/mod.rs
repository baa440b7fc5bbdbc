pub mod market;
pub mod signal;
pub mod wallet;

pub use market::{
    MarketRow, OutcomeRef, RawMarket, SharpAlignmentBreakdown, Venue, VenueCode, WalletCounts,
};
pub use signal::{
    DashboardData, DashboardSnapshot, LatestSnapshot, SignalEvent, SignalTag, SmartSide,
};
pub use wallet::{
    MarketDetail, SharpWalletPosition, SharpWalletPositions, WalletActivity, WalletAnalytics,
    WalletTier,
};

use crate::models::{
    SharpWalletPosition, SharpWalletPositions, SmartSide, WalletAnalytics, WalletTier,
};

fn yes_tier(rank: usize) -> WalletTier {
    match rank {
        0 => WalletTier::S,
        1 => WalletTier::A,
        2 => WalletTier::B,
        _ => WalletTier::C,
    }
}

fn no_tier(rank: usize) -> WalletTier {
    match rank {
        0 => WalletTier::B,
        1 => WalletTier::A,
        _ => WalletTier::C,
    }
}

/// Placeholder positions derived from the wallet counts.
///
/// Addresses are `{MARKET PREFIX}-{NNN}`; YES wallets are numbered from 1,
/// NO wallets from 10.
pub fn positions_from_analytics(
    market_id: &str,
    analytics: &WalletAnalytics,
) -> SharpWalletPositions {
    let prefix: String = market_id.chars().take(8).collect::<String>().to_uppercase();

    let yes = (0..analytics.yes_sharps as usize)
        .map(|i| SharpWalletPosition {
            wallet_address: format!("{}-{:03}", prefix, i + 1),
            side: SmartSide::Yes,
            tier: yes_tier(i),
            position_size: None,
            pnl: None,
        })
        .collect();

    let no = (0..analytics.no_sharps as usize)
        .map(|i| SharpWalletPosition {
            wallet_address: format!("{}-{:03}", prefix, i + 10),
            side: SmartSide::No,
            tier: no_tier(i),
            position_size: None,
            pnl: None,
        })
        .collect();

    SharpWalletPositions { yes, no }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_layout() {
        let p = positions_from_analytics("0xdeadbeefcafe", &WalletAnalytics::new(4, 3));

        assert_eq!(p.yes.len(), 4);
        assert_eq!(p.no.len(), 3);
        assert_eq!(p.yes[0].wallet_address, "0XDEADBE-001");
        assert_eq!(p.no[0].wallet_address, "0XDEADBE-010");
        assert_eq!(
            p.yes.iter().map(|w| w.tier).collect::<Vec<_>>(),
            vec![WalletTier::S, WalletTier::A, WalletTier::B, WalletTier::C]
        );
        assert_eq!(
            p.no.iter().map(|w| w.tier).collect::<Vec<_>>(),
            vec![WalletTier::B, WalletTier::A, WalletTier::C]
        );
        assert!(p.no.iter().all(|w| w.side == SmartSide::No));
    }

    #[test]
    fn test_no_wallets_no_positions() {
        let p = positions_from_analytics("m1", &WalletAnalytics::default());
        assert!(p.yes.is_empty());
        assert!(p.no.is_empty());
    }
}

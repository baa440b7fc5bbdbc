use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sharp_signal::api::{
    DomeClient, MarketDataProvider, MockWalletAnalytics, WalletAnalyticsSource,
};
use sharp_signal::config::Config;
use sharp_signal::models::LatestSnapshot;
use sharp_signal::pipeline::DashboardPipeline;
use sharp_signal::server::{router, ApiState};
use sharp_signal::workers::DashboardRefresherWorker;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sharp_signal=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting sharp-signal");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded (API key: {}, venues: {:?})",
        config.api_key_summary(),
        config.venues
    );

    // Initialize data sources
    let dome: Arc<dyn MarketDataProvider> = Arc::new(
        DomeClient::new(&config.dome_api_url, &config.dome_api_key)
            .context("Failed to initialize Dome client")?,
    );
    let wallets: Arc<dyn WalletAnalyticsSource> = Arc::new(MockWalletAnalytics::new());
    info!("Data sources initialized (wallet analytics: mock)");

    let pipeline = Arc::new(DashboardPipeline::new(
        dome,
        wallets,
        config.venues.clone(),
        config.market_limit,
    ));

    // Shared state
    let latest: Arc<RwLock<LatestSnapshot>> = Arc::new(RwLock::new(None));

    let refresher = DashboardRefresherWorker::new(
        Arc::clone(&pipeline),
        Arc::clone(&latest),
        config.revalidate_secs,
    );

    let refresher_handle = tokio::spawn(async move {
        refresher.run().await;
    });

    // HTTP API server
    let app = router(ApiState {
        latest: Arc::clone(&latest),
        pipeline: Arc::clone(&pipeline),
    });
    let bind_addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!("HTTP API listening on {}", bind_addr);

    let server_handle = tokio::spawn(async move { axum::serve(listener, app).await });

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        result = refresher_handle => {
            error!("Dashboard refresher exited unexpectedly: {:?}", result);
        }
        result = server_handle => {
            error!("HTTP server exited unexpectedly: {:?}", result);
        }
    }

    info!("Shutting down sharp-signal");
    Ok(())
}

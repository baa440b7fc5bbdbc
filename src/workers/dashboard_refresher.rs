use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::time;
use tracing::info;

use crate::models::{DashboardSnapshot, LatestSnapshot};
use crate::pipeline::DashboardPipeline;

/// Worker that recomputes the dashboard on a fixed revalidation interval
pub struct DashboardRefresherWorker {
    pipeline: Arc<DashboardPipeline>,
    latest: Arc<RwLock<LatestSnapshot>>,
    revalidate_interval: Duration,
}

impl DashboardRefresherWorker {
    /// Create a new refresher worker
    pub fn new(
        pipeline: Arc<DashboardPipeline>,
        latest: Arc<RwLock<LatestSnapshot>>,
        revalidate_secs: u64,
    ) -> Self {
        Self {
            pipeline,
            latest,
            revalidate_interval: Duration::from_secs(revalidate_secs),
        }
    }

    /// Run the worker loop
    pub async fn run(&self) {
        info!(
            "Dashboard refresher started (interval: {:?})",
            self.revalidate_interval
        );

        // Run initial refresh immediately
        self.refresh().await;

        let mut interval = time::interval(self.revalidate_interval);
        interval.tick().await; // Skip first tick (already ran)

        loop {
            interval.tick().await;
            self.refresh().await;
        }
    }

    /// Perform a single recomputation and publish it
    pub async fn refresh(&self) {
        let data = self.pipeline.get_dashboard_data().await;

        info!(
            "Dashboard refreshed: {} markets, {} events",
            data.markets.len(),
            data.signal_events.len()
        );

        let snapshot = DashboardSnapshot {
            data,
            generated_at: Utc::now(),
        };

        *self.latest.write().await = Some(snapshot);
    }
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::models::{DashboardSnapshot, LatestSnapshot, MarketDetail};
use crate::pipeline::DashboardPipeline;
use crate::server::error::ApiError;

#[derive(Clone)]
pub struct ApiState {
    pub latest: Arc<RwLock<LatestSnapshot>>,
    pub pipeline: Arc<DashboardPipeline>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/markets/:id", get(get_market))
        .route("/health", get(get_health))
        .with_state(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub has_snapshot: bool,
    pub generated_at: Option<DateTime<Utc>>,
    pub markets: usize,
    pub events: usize,
}

async fn get_dashboard(State(state): State<ApiState>) -> Result<Json<DashboardSnapshot>, ApiError> {
    let latest = state.latest.read().await;
    latest.as_ref().cloned().map(Json).ok_or(ApiError::Offline)
}

async fn get_market(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<MarketDetail>, ApiError> {
    let row = {
        let latest = state.latest.read().await;
        let snapshot = latest.as_ref().ok_or(ApiError::Offline)?;
        snapshot
            .data
            .markets
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| ApiError::MarketNotFound(id.clone()))?
    };

    Ok(Json(state.pipeline.market_detail(row)))
}

async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let latest = state.latest.read().await;

    let response = match latest.as_ref() {
        Some(snapshot) => HealthResponse {
            status: "ok",
            has_snapshot: true,
            generated_at: Some(snapshot.generated_at),
            markets: snapshot.data.markets.len(),
            events: snapshot.data.signal_events.len(),
        },
        None => HealthResponse {
            status: "starting",
            has_snapshot: false,
            generated_at: None,
            markets: 0,
            events: 0,
        },
    };

    Json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DomeError, MarketDataProvider, MockWalletAnalytics};
    use crate::models::{RawMarket, Venue};
    use crate::pipeline::sample_dashboard_data;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    struct NoMarkets;

    #[async_trait]
    impl MarketDataProvider for NoMarkets {
        async fn list_markets(&self, _: Venue, _: u32) -> Result<Vec<RawMarket>, DomeError> {
            Ok(Vec::new())
        }

        async fn market_price(&self, _: &str) -> Result<f64, DomeError> {
            Ok(0.5)
        }
    }

    fn state(latest: LatestSnapshot) -> ApiState {
        let pipeline = DashboardPipeline::new(
            Arc::new(NoMarkets),
            Arc::new(MockWalletAnalytics::seeded(3)),
            vec![Venue::Polymarket],
            100,
        );
        ApiState {
            latest: Arc::new(RwLock::new(latest)),
            pipeline: Arc::new(pipeline),
        }
    }

    fn sample_snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            data: sample_dashboard_data(Utc::now().naive_utc()),
            generated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_dashboard_offline_before_first_snapshot() {
        let err = get_dashboard(State(state(None))).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_dashboard_serves_snapshot() {
        let Json(snapshot) = get_dashboard(State(state(Some(sample_snapshot()))))
            .await
            .unwrap();
        assert_eq!(snapshot.data.markets.len(), 4);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["markets"][0]["signalTag"], "PRE-MOVE");
        assert_eq!(json["markets"][0]["smartSide"], "YES");
        assert_eq!(json["markets"][0]["venue"], "POLY");
        assert_eq!(json["markets"][0]["sharpAlignmentBreakdown"]["totalSharps"], 8);
        assert_eq!(json["signalEvents"][0]["highlightColor"], "#ff8800");
        assert!(json["signalEvents"][1].get("highlightColor").is_none());
        assert!(json.get("generatedAt").is_some());
    }

    #[tokio::test]
    async fn test_market_detail_lookup() {
        let s = state(Some(sample_snapshot()));

        let Json(detail) = get_market(State(s.clone()), Path("sample-3".to_string()))
            .await
            .unwrap();
        assert_eq!(detail.row.id, "sample-3");
        let positions = &detail.sharp_wallet_positions;
        assert_eq!(positions.yes.len() as u32, detail.row.wallet_counts.yes_sharps);
        assert_eq!(positions.no.len() as u32, detail.row.wallet_counts.no_sharps);
        assert!(positions.yes.iter().all(|p| p.wallet_address.starts_with("SAMPLE-3-")));

        let err = get_market(State(s), Path("missing".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let Json(h) = get_health(State(state(None))).await;
        assert_eq!(h.status, "starting");
        assert!(!h.has_snapshot);

        let Json(h) = get_health(State(state(Some(sample_snapshot())))).await;
        assert_eq!(h.status, "ok");
        assert_eq!(h.markets, 4);
        assert_eq!(h.events, 3);
    }
}

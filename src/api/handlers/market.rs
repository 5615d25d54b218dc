use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use tracing::info;

use crate::aggregation::normalize_market_prices;
use crate::api::{ApiError, AppState};
use crate::monitor::{ApiMetrics, RequestOutcome};

const ROUTE: &str = "market_prices";

/// BTC 與 ETH 的即時報價
pub async fn market_prices(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let raw = state.price_source.fetch_prices().await.map_err(|e| {
        ApiMetrics::record_request(ROUTE, RequestOutcome::UpstreamError);
        ApiError::from(e)
    })?;

    let snapshot = normalize_market_prices(&raw);
    info!(
        bitcoin = snapshot.bitcoin.is_some(),
        ethereum = snapshot.ethereum.is_some(),
        "市場報價完成"
    );
    ApiMetrics::record_request(ROUTE, RequestOutcome::Success);

    Ok(Json(json!({ "success": true, "data": snapshot })))
}

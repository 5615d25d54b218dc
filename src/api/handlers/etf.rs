use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::aggregation::{normalize_listing, summarize, summarize_combined};
use crate::api::{ApiError, AppState};
use crate::domain_types::window::MAX_WINDOW_DAYS;
use crate::domain_types::{Asset, EtfListing};
use crate::monitor::{ApiMetrics, RequestOutcome};

/// 合併路由的預設視窗天數
pub const DEFAULT_COMBINED_DAYS: i64 = 7;
/// 單一資產路由的預設視窗天數
pub const DEFAULT_FLOW_DAYS: i64 = 30;

#[derive(Debug, Default, Deserialize)]
pub struct DaysQuery {
    pub days: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub success: bool,
    pub data: Vec<EtfListing>,
    pub count: usize,
}

/// 解析 `days` 查詢參數
///
/// 無法解析為整數時使用路由預設值；解析成功但超出範圍則為 400。
pub fn resolve_days(raw: Option<&str>, default: i64) -> Result<i64, ApiError> {
    let days = match raw.map(|s| s.trim().parse::<i64>()) {
        Some(Ok(days)) => days,
        _ => default,
    };
    if !(1..=MAX_WINDOW_DAYS).contains(&days) {
        return Err(ApiError::BadRequest(format!(
            "days must be between 1 and {}, got {}",
            MAX_WINDOW_DAYS, days
        )));
    }
    Ok(days)
}

/// BTC + ETH 合併資金流
pub async fn combined_flows(
    State(state): State<AppState>,
    Query(query): Query<DaysQuery>,
) -> Result<Response, ApiError> {
    const ROUTE: &str = "combined";
    let days = resolve_days(query.days.as_deref(), DEFAULT_COMBINED_DAYS).inspect_err(|_| {
        ApiMetrics::record_request(ROUTE, RequestOutcome::BadRequest);
    })?;
    info!(days, "取得合併資金流");

    let (btc, eth) = tokio::join!(
        state.etf_source.fetch_flows(Asset::Bitcoin),
        state.etf_source.fetch_flows(Asset::Ethereum),
    );
    // 上游錯誤與空資料一併以筆數回報
    let btc = btc
        .inspect_err(|e| warn!(asset = %Asset::Bitcoin, error = %e, "上游請求失敗"))
        .unwrap_or_default();
    let eth = eth
        .inspect_err(|e| warn!(asset = %Asset::Ethereum, error = %e, "上游請求失敗"))
        .unwrap_or_default();

    if btc.record_count() == 0 || eth.record_count() == 0 {
        let details = format!(
            "BTC data: {} records, ETH data: {} records",
            btc.record_count(),
            eth.record_count()
        );
        error!(%details, "合併資金流缺少資料");
        ApiMetrics::record_request(ROUTE, RequestOutcome::NoData);
        return Err(ApiError::CombinedNoData { details });
    }

    let result = summarize_combined(btc.records(), eth.records(), days);
    match result.summary() {
        Some(summary) => {
            info!(points = summary.point_count, "合併資金流完成");
            ApiMetrics::record_request(ROUTE, RequestOutcome::Success);
            Ok(Json(result).into_response())
        }
        None => {
            error!(error = ?result.error(), "合併資金流聚合失敗");
            ApiMetrics::record_request(ROUTE, RequestOutcome::AggregationFailure);
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(result)).into_response())
        }
    }
}

pub async fn bitcoin_flows(
    State(state): State<AppState>,
    Query(query): Query<DaysQuery>,
) -> Result<Response, ApiError> {
    asset_flows(&state, Asset::Bitcoin, "bitcoin_flows", query).await
}

pub async fn ethereum_flows(
    State(state): State<AppState>,
    Query(query): Query<DaysQuery>,
) -> Result<Response, ApiError> {
    asset_flows(&state, Asset::Ethereum, "ethereum_flows", query).await
}

async fn asset_flows(
    state: &AppState,
    asset: Asset,
    route: &'static str,
    query: DaysQuery,
) -> Result<Response, ApiError> {
    let days = resolve_days(query.days.as_deref(), DEFAULT_FLOW_DAYS).inspect_err(|_| {
        ApiMetrics::record_request(route, RequestOutcome::BadRequest);
    })?;
    info!(%asset, days, "取得資金流");

    let payload = state.etf_source.fetch_flows(asset).await.map_err(|e| {
        error!(%asset, error = %e, "上游請求失敗");
        ApiMetrics::record_request(route, RequestOutcome::UpstreamError);
        ApiError::from(e)
    })?;

    if payload.record_count() == 0 {
        error!(%asset, "上游未回傳資金流資料");
        ApiMetrics::record_request(route, RequestOutcome::NoData);
        return Err(ApiError::NoData(format!("No {} data", asset.label())));
    }

    let result = summarize(payload.records(), days, asset.label());
    match result.summary() {
        Some(summary) => {
            info!(%asset, points = summary.point_count, range = %summary.date_range_label, "資金流完成");
            ApiMetrics::record_request(route, RequestOutcome::Success);
            Ok(Json(result).into_response())
        }
        None => {
            error!(%asset, error = ?result.error(), "資金流聚合失敗");
            ApiMetrics::record_request(route, RequestOutcome::AggregationFailure);
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(result)).into_response())
        }
    }
}

pub async fn bitcoin_list(State(state): State<AppState>) -> Result<Json<ListingResponse>, ApiError> {
    asset_list(&state, Asset::Bitcoin, "bitcoin_list").await
}

pub async fn ethereum_list(State(state): State<AppState>) -> Result<Json<ListingResponse>, ApiError> {
    asset_list(&state, Asset::Ethereum, "ethereum_list").await
}

async fn asset_list(
    state: &AppState,
    asset: Asset,
    route: &'static str,
) -> Result<Json<ListingResponse>, ApiError> {
    let payload = state.etf_source.fetch_listing(asset).await.map_err(|e| {
        error!(%asset, error = %e, "上游請求失敗");
        ApiMetrics::record_request(route, RequestOutcome::UpstreamError);
        ApiError::from(e)
    })?;

    let data = normalize_listing(payload.listings());
    info!(%asset, count = data.len(), "ETF 列表完成");
    ApiMetrics::record_request(route, RequestOutcome::Success);

    Ok(Json(ListingResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

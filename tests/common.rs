#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use mockall::mock;
use std::collections::HashMap;
use std::sync::Arc;

use etf_flow_tracker::api::{build_router, AppState};
use etf_flow_tracker::config::{RestApiConfig, ServerConfig};
use etf_flow_tracker::data_provider::{EtfDataSource, MarketPriceSource, UpstreamError};
use etf_flow_tracker::domain_types::{Asset, FlowPayload, FlowRecord, ListingPayload, RawCoinQuote};
use etf_flow_tracker::utils::MILLIS_PER_DAY;

mock! {
    pub EtfSource {}

    #[async_trait]
    impl EtfDataSource for EtfSource {
        async fn fetch_flows(&self, asset: Asset) -> Result<FlowPayload, UpstreamError>;
        async fn fetch_listing(&self, asset: Asset) -> Result<ListingPayload, UpstreamError>;
    }
}

mock! {
    pub PriceSource {}

    #[async_trait]
    impl MarketPriceSource for PriceSource {
        async fn fetch_prices(&self) -> Result<HashMap<String, RawCoinQuote>, UpstreamError>;
    }
}

/// 固定參考時刻 2024-06-10 12:00 UTC
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
}

/// `now` 所在日期偏移 `offset_days` 天、指定整點的毫秒時間戳
pub fn day_at(now: &DateTime<Utc>, offset_days: i64, hour: u32) -> i64 {
    let date = now.date_naive() + Duration::days(offset_days);
    date.and_hms_opt(hour, 0, 0).unwrap().and_utc().timestamp_millis()
}

/// 在 `now` 之前各 `days_ago` 天的同一時刻產生一筆記錄
pub fn records_over_days(now: &DateTime<Utc>, days_ago: &[i64], flow: f64) -> Vec<FlowRecord> {
    days_ago
        .iter()
        .map(|days| FlowRecord::new(now.timestamp_millis() - days * MILLIS_PER_DAY, flow))
        .collect()
}

/// 以真實時鐘為準的近期記錄，供 HTTP 層測試使用
pub fn recent_payload(days_ago: &[i64], flow: f64) -> FlowPayload {
    FlowPayload::with_records(records_over_days(&Utc::now(), days_ago, flow))
}

pub fn test_server_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 3000,
        request_timeout: 30,
        serve_static: false,
        static_files_dir: String::new(),
    }
}

pub fn test_api_config() -> RestApiConfig {
    RestApiConfig {
        base_path: "/api".to_string(),
        cors_allow_all: true,
        cors_origins: Vec::new(),
    }
}

pub fn test_router(etf: MockEtfSource, prices: MockPriceSource) -> axum::Router {
    let state = AppState::new(Arc::new(etf), Arc::new(prices));
    build_router(state, &test_server_config(), &test_api_config())
}

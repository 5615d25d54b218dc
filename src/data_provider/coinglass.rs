use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::CoinGlassConfig;
use crate::data_provider::source::{check_envelope, EtfDataSource, UpstreamError};
use crate::domain_types::{Asset, FlowPayload, ListingPayload};
use crate::monitor::ApiMetrics;

const PROVIDER: &str = "coinglass";

/// CoinGlass v4 API 客戶端
#[derive(Debug, Clone)]
pub struct CoinGlassClient {
    client: Client,
    base_url: String,
    max_records: u32,
}

impl CoinGlassClient {
    /// 依配置建立客戶端，API 金鑰以 `CG-API-KEY` 標頭送出
    pub fn new(config: &CoinGlassConfig) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| UpstreamError::Config(format!("invalid CG-API-KEY: {}", e)))?;
        headers.insert(HeaderName::from_static("cg-api-key"), key);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_records: config.max_records,
        })
    }

    pub fn flow_endpoint(asset: Asset) -> String {
        format!("etf/{}/flow-history", asset.slug())
    }

    pub fn listing_endpoint(asset: Asset) -> String {
        format!("etf/{}/list", asset.slug())
    }

    async fn fetch_body(&self, endpoint: &str, query: &[(&str, String)]) -> Result<String, UpstreamError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, ?query, "CoinGlass 請求");

        let started = Instant::now();
        let result = self.send(&url, query).await;
        ApiMetrics::record_upstream_latency(PROVIDER, endpoint, started.elapsed());

        if let Err(e) = &result {
            warn!(%url, error = %e, "CoinGlass 請求失敗");
            ApiMetrics::record_upstream_error(PROVIDER, endpoint);
        }
        result
    }

    async fn send(&self, url: &str, query: &[(&str, String)]) -> Result<String, UpstreamError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "CoinGlass 回應");

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: truncate(&body, 500),
            });
        }
        Ok(body)
    }
}

/// 解析資金流歷史回應並檢查供應商錯誤碼
pub fn decode_flows(body: &str) -> Result<FlowPayload, UpstreamError> {
    let payload: FlowPayload = serde_json::from_str(body)?;
    check_envelope(payload.code.as_deref(), payload.msg.as_deref())?;
    Ok(payload)
}

/// 解析 ETF 列表回應並檢查供應商錯誤碼
pub fn decode_listing(body: &str) -> Result<ListingPayload, UpstreamError> {
    let payload: ListingPayload = serde_json::from_str(body)?;
    check_envelope(payload.code.as_deref(), payload.msg.as_deref())?;
    Ok(payload)
}

fn truncate(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}

#[async_trait]
impl EtfDataSource for CoinGlassClient {
    async fn fetch_flows(&self, asset: Asset) -> Result<FlowPayload, UpstreamError> {
        let endpoint = Self::flow_endpoint(asset);
        let body = self
            .fetch_body(&endpoint, &[("limit", self.max_records.to_string())])
            .await?;
        let payload = decode_flows(&body)?;
        debug!(%asset, records = payload.record_count(), "資金流歷史已取得");
        Ok(payload)
    }

    async fn fetch_listing(&self, asset: Asset) -> Result<ListingPayload, UpstreamError> {
        let body = self.fetch_body(&Self::listing_endpoint(asset), &[]).await?;
        decode_listing(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn config(api_key: &str) -> CoinGlassConfig {
        CoinGlassConfig {
            base_url: "https://open-api-v4.coinglass.com/api/".to_string(),
            api_key: api_key.to_string(),
            timeout_secs: 30,
            max_records: 1000,
        }
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(CoinGlassClient::flow_endpoint(Asset::Bitcoin), "etf/bitcoin/flow-history");
        assert_eq!(CoinGlassClient::listing_endpoint(Asset::Ethereum), "etf/ethereum/list");
    }

    #[test]
    fn test_client_construction() {
        let client = CoinGlassClient::new(&config("abc123")).unwrap();
        assert_eq!(client.base_url, "https://open-api-v4.coinglass.com/api");
        assert_matches!(CoinGlassClient::new(&config("bad\nkey")), Err(UpstreamError::Config(_)));
    }

    #[test]
    fn test_decode_flows() {
        let payload = decode_flows(
            r#"{"code": "0", "msg": "success", "data": [{"timestamp": 1704067200000, "flow_usd": 655300000}]}"#,
        )
        .unwrap();
        assert_eq!(payload.record_count(), 1);

        assert_matches!(
            decode_flows(r#"{"code": "30001", "msg": "rate limited"}"#),
            Err(UpstreamError::Api { .. })
        );
        assert_matches!(
            decode_flows(r#"{"data": [{"timestamp": 1, "flow_usd": "n/a"}]}"#),
            Err(UpstreamError::Decode(_))
        );
    }

    #[test]
    fn test_decode_listing() {
        let payload = decode_listing(r#"{"code": 0, "data": [{"etfTicker": "ETHA"}]}"#).unwrap();
        assert_eq!(payload.listings().map(|l| l.len()), Some(1));
    }
}

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::Client;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::CoinGeckoConfig;
use crate::data_provider::source::{MarketPriceSource, UpstreamError};
use crate::domain_types::RawCoinQuote;
use crate::monitor::ApiMetrics;

const PROVIDER: &str = "coingecko";
const SIMPLE_PRICE: &str = "simple/price";

/// CoinGecko 報價客戶端
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    /// 建立客戶端，配置了金鑰時附帶 `x-cg-pro-api-key`
    pub fn new(config: &CoinGeckoConfig) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if !config.api_key.trim().is_empty() {
            let key = HeaderValue::from_str(config.api_key.trim())
                .map_err(|e| UpstreamError::Config(format!("invalid x-cg-pro-api-key: {}", e)))?;
            headers.insert(HeaderName::from_static("x-cg-pro-api-key"), key);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn price_query() -> [(&'static str, &'static str); 5] {
        [
            ("ids", "bitcoin,ethereum"),
            ("vs_currencies", "usd"),
            ("include_market_cap", "true"),
            ("include_24hr_vol", "true"),
            ("include_24hr_change", "true"),
        ]
    }
}

#[async_trait]
impl MarketPriceSource for CoinGeckoClient {
    async fn fetch_prices(&self) -> Result<HashMap<String, RawCoinQuote>, UpstreamError> {
        let url = format!("{}/{}", self.base_url, SIMPLE_PRICE);
        let started = Instant::now();

        let result: Result<HashMap<String, RawCoinQuote>, UpstreamError> = async {
            let response = self.client.get(&url).query(&Self::price_query()).send().await?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(UpstreamError::Status {
                    status: status.as_u16(),
                    body: body.chars().take(500).collect(),
                });
            }
            Ok(serde_json::from_str::<HashMap<String, RawCoinQuote>>(&body)?)
        }
        .await;
        ApiMetrics::record_upstream_latency(PROVIDER, SIMPLE_PRICE, started.elapsed());

        match &result {
            Ok(quotes) => debug!(coins = quotes.len(), "市場報價已取得"),
            Err(e) => {
                warn!(%url, error = %e, "CoinGecko 請求失敗");
                ApiMetrics::record_upstream_error(PROVIDER, SIMPLE_PRICE);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_without_key() {
        let config = CoinGeckoConfig {
            base_url: "https://api.coingecko.com/api/v3/".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
        };
        let client = CoinGeckoClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://api.coingecko.com/api/v3");
    }

    #[test]
    fn test_price_query_requests_both_coins() {
        let query = CoinGeckoClient::price_query();
        assert!(query.contains(&("ids", "bitcoin,ethereum")));
        assert!(query.contains(&("vs_currencies", "usd")));
    }
}

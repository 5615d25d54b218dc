use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::domain_types::{Asset, FlowPayload, ListingPayload, RawCoinQuote};

/// 上游請求錯誤
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// 客戶端建立失敗（無效的標頭值等）
    #[error("client configuration error: {0}")]
    Config(String),

    /// 傳輸層錯誤（連線、超時）
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// 非 2xx 回應
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// 回應主體無法解析
    #[error("invalid upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    /// 供應商在回應封包中回報錯誤
    #[error("upstream error {code}: {msg}")]
    Api { code: String, msg: String },
}

/// ETF 資金流與列表資料來源
#[async_trait]
pub trait EtfDataSource: Send + Sync {
    /// 取得資產的完整資金流歷史
    async fn fetch_flows(&self, asset: Asset) -> Result<FlowPayload, UpstreamError>;

    /// 取得資產的 ETF 列表
    async fn fetch_listing(&self, asset: Asset) -> Result<ListingPayload, UpstreamError>;
}

/// 市場報價資料來源，鍵為幣種 id（"bitcoin"、"ethereum"）
#[async_trait]
pub trait MarketPriceSource: Send + Sync {
    async fn fetch_prices(&self) -> Result<HashMap<String, RawCoinQuote>, UpstreamError>;
}

/// 檢查供應商封包的 `code` 欄位，缺少或為 "0" 視為成功
pub fn check_envelope(code: Option<&str>, msg: Option<&str>) -> Result<(), UpstreamError> {
    match code {
        None | Some("0") => Ok(()),
        Some(code) => Err(UpstreamError::Api {
            code: code.to_string(),
            msg: msg.unwrap_or("unknown error").to_string(),
        }),
    }
}

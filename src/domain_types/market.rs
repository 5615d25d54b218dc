use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::lenient_f64;

/// CoinGecko `simple/price` 回應中單一幣種的報價
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCoinQuote {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub usd: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub usd_market_cap: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub usd_24h_vol: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub usd_24h_change: f64,
}

/// 正規化後的報價
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinQuote {
    pub price: f64,
    pub market_cap: f64,
    #[serde(rename = "volume24h")]
    pub volume_24h: f64,
    #[serde(rename = "change24h")]
    pub change_24h: f64,
}

impl From<&RawCoinQuote> for CoinQuote {
    fn from(raw: &RawCoinQuote) -> Self {
        Self {
            price: raw.usd,
            market_cap: raw.usd_market_cap,
            volume_24h: raw.usd_24h_vol,
            change_24h: raw.usd_24h_change,
        }
    }
}

/// BTC 與 ETH 市場快照，上游缺少的幣種會被省略
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitcoin: Option<CoinQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethereum: Option<CoinQuote>,
}

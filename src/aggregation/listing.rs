use std::collections::HashMap;

use crate::domain_types::{CoinQuote, EtfListing, MarketSnapshot, RawCoinQuote, RawListing};

/// 將上游 ETF 列表投影為顯示項目
///
/// 缺少的字串欄位為空字串、數值欄位為 0；沒有列表容器時回傳空列表。
pub fn normalize_listing(raw: Option<&[RawListing]>) -> Vec<EtfListing> {
    raw.unwrap_or_default()
        .iter()
        .map(|item| EtfListing {
            ticker: item.ticker.clone().unwrap_or_default(),
            name: item.name.clone().unwrap_or_default(),
            issuer: item.issuer.clone().unwrap_or_default(),
            holdings: item.holdings,
            aum: item.aum,
        })
        .collect()
}

/// 從 CoinGecko 報價映射中取出 BTC 與 ETH
pub fn normalize_market_prices(raw: &HashMap<String, RawCoinQuote>) -> MarketSnapshot {
    MarketSnapshot {
        bitcoin: raw.get("bitcoin").map(CoinQuote::from),
        ethereum: raw.get("ethereum").map(CoinQuote::from),
    }
}

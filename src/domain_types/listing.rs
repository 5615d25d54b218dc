use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::{lenient_f64, lenient_string_opt};

/// 上游 ETF 列表中的原始項目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    #[serde(rename = "etfTicker", default, deserialize_with = "lenient_string_opt")]
    pub ticker: Option<String>,
    #[serde(rename = "etfName", default, deserialize_with = "lenient_string_opt")]
    pub name: Option<String>,
    #[serde(rename = "etfIssuer", default, deserialize_with = "lenient_string_opt")]
    pub issuer: Option<String>,
    #[serde(rename = "etfHoldings", default, deserialize_with = "lenient_f64")]
    pub holdings: f64,
    #[serde(rename = "etfAUM", default, deserialize_with = "lenient_f64")]
    pub aum: f64,
}

/// 上游 ETF 列表回應
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingPayload {
    #[serde(default, deserialize_with = "lenient_string_opt", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<RawListing>>,
}

impl ListingPayload {
    pub fn listings(&self) -> Option<&[RawListing]> {
        self.data.as_deref()
    }
}

/// 對外顯示的 ETF 項目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtfListing {
    pub ticker: String,
    pub name: String,
    pub issuer: String,
    pub holdings: f64,
    pub aum: f64,
}

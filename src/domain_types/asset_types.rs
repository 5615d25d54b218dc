use serde::{Deserialize, Serialize};
use std::fmt;

/// 追蹤的 ETF 資產類別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    Bitcoin,  // 比特幣現貨 ETF
    Ethereum, // 以太坊現貨 ETF
}

impl Asset {
    /// 上游 API 路徑與路由使用的小寫名稱
    pub fn slug(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "bitcoin",
            Asset::Ethereum => "ethereum",
        }
    }

    /// 摘要輸出中的顯示標籤
    pub fn label(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "Bitcoin",
            Asset::Ethereum => "Ethereum",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// aggregation.rs - 資金流聚合引擎
//
// 純函數模組：輸入已取得的上游記錄與視窗天數，輸出圖表序列與摘要。
// 模組內不做 I/O、不記錄日誌，也不持有任何共享狀態；
// 每次呼叫只讀取一次當前時間。

/// 聚合錯誤分類
pub mod error;
/// 單一資產與合併資產的資金流摘要
pub mod flows;
/// ETF 列表與市場報價的欄位投影
pub mod listing;
/// 帶標記的聚合結果
pub mod result;

pub use error::AggregationError;
pub use flows::{
    bucket_by_day, summarize, summarize_at, summarize_combined, summarize_combined_at,
    FIXED_WINDOW_DAYS,
};
pub use listing::{normalize_listing, normalize_market_prices};
pub use result::AggregateResult;

// domain_types.rs - 領域類型模組
//
// 定義 ETF 資金流聚合所使用的資料結構：上游記錄、視窗規格、
// 圖表數據點與聚合摘要。

pub mod asset_types;
pub mod flow;
pub mod listing;
pub mod market;
pub mod summary;
pub mod window;

pub use asset_types::Asset;
pub use flow::{DailyFlowMap, FlowPayload, FlowRecord};
pub use listing::{EtfListing, ListingPayload, RawListing};
pub use market::{CoinQuote, MarketSnapshot, RawCoinQuote};
pub use summary::{AssetFlowSummary, CombinedFlowSummary, CombinedPoint, DailyPoint};
pub use window::WindowSpec;

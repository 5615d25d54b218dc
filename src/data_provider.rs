// data_provider.rs - 上游資料提供者
//
// 聚合引擎只依賴 `EtfDataSource` 與 `MarketPriceSource` 兩個特性；
// 具體的 HTTP 客戶端在 main 中建立一次，經由 AppState 注入處理器。

pub mod coingecko;
pub mod coinglass;
pub mod source;

pub use coingecko::CoinGeckoClient;
pub use coinglass::CoinGlassClient;
pub use source::{EtfDataSource, MarketPriceSource, UpstreamError};

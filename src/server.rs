// server.rs - 伺服器層級錯誤，宣告子模組
//
// HTTP 服務本身位於 `api::rest`，此處僅定義其啟動與運行期間的錯誤。

/// 伺服器級別錯誤處理
pub mod error;

pub use error::{ServerError, ServerResult};

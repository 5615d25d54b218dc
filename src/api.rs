// api.rs - API服務模組，宣告子模組
//
// API服務模組提供外部接口，實現：
// - ETF 資金流與列表的 RESTful 接口
// - 市場報價與健康檢查
// - 靜態儀表板頁面

/// REST API實現
pub mod rest;
/// API路由定義
pub mod routes;
/// API處理器模組
pub mod handlers;
/// 處理器共享狀態
pub mod state;
/// HTTP 錯誤回應
pub mod error;

pub use error::ApiError;
pub use rest::{build_router, RestApi};
pub use state::AppState;

use std::sync::Arc;

use crate::data_provider::{EtfDataSource, MarketPriceSource};

/// 處理器共享狀態，上游客戶端在啟動時建立一次後注入
#[derive(Clone)]
pub struct AppState {
    pub etf_source: Arc<dyn EtfDataSource>,
    pub price_source: Arc<dyn MarketPriceSource>,
}

impl AppState {
    pub fn new(etf_source: Arc<dyn EtfDataSource>, price_source: Arc<dyn MarketPriceSource>) -> Self {
        Self {
            etf_source,
            price_source,
        }
    }
}

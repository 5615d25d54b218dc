use axum::Router;

use crate::api::AppState;

pub mod etf;
pub mod market;
pub mod system;

/// 所有 API 路由，掛載於 `rest_api.base_path` 之下
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(etf::routes())
        .merge(market::routes())
        .merge(system::routes())
}

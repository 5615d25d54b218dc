// src/api/routes/market.rs
use axum::{routing::get, Router};

use crate::api::handlers::market;
use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/market/prices", get(market::market_prices))
}

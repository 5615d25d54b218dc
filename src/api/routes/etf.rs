// src/api/routes/etf.rs
use axum::{routing::get, Router};

use crate::api::handlers::etf;
use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/etf/combined", get(etf::combined_flows))
        .route("/etf/bitcoin/flows", get(etf::bitcoin_flows))
        .route("/etf/ethereum/flows", get(etf::ethereum_flows))
        .route("/etf/bitcoin/list", get(etf::bitcoin_list))
        .route("/etf/ethereum/list", get(etf::ethereum_list))
}

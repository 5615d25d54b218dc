// 模組定義
pub mod aggregation;
pub mod api;
pub mod config;
pub mod data_provider;
pub mod domain_types;
pub mod monitor;
pub mod server;
pub mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use etf_flow_tracker::api::{AppState, RestApi};
use etf_flow_tracker::config::{self, ConfigLoader, Environment, Validator};
use etf_flow_tracker::data_provider::{CoinGeckoClient, CoinGlassClient};
use etf_flow_tracker::monitor::{init_logging, install_prometheus_exporter};

/// 加密貨幣 ETF 資金流追蹤伺服器
#[derive(Debug, Parser)]
#[command(name = "etf_flow_tracker", version, about)]
struct Cli {
    /// 執行環境（development / production），未指定時讀取 ETF_TRACKER_ENV
    #[arg(short, long)]
    env: Option<String>,

    /// 配置檔目錄，未指定時讀取 CONFIG_DIR 或使用 ./config
    #[arg(short, long)]
    config_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env = cli
        .env
        .as_deref()
        .map(Environment::parse)
        .unwrap_or_else(Environment::from_env);
    let config_dir = cli.config_dir.unwrap_or_else(ConfigLoader::config_dir);

    // 初始化配置
    let app_config = config::init_config(&config_dir, env)
        .with_context(|| format!("無法載入配置: {}", config_dir.display()))?;

    // 初始化日誌系統，guard 需存活至程式結束
    let _log_guard = init_logging(&app_config.log).context("設置日誌系統失敗")?;
    info!(env = ?env, config_dir = %config_dir.display(), "配置載入完成");
    // 載入時日誌尚未就緒，在此重新回報驗證結果
    if let Err(e) = app_config.validate() {
        warn!("配置驗證失敗: {}", e);
    }

    if app_config.metrics.enabled {
        install_prometheus_exporter(&app_config.metrics.listen).context("無法啟動 Prometheus 匯出器")?;
        info!(listen = %app_config.metrics.listen, "Prometheus 匯出器已啟動");
    }

    // 上游客戶端在此建立一次，之後由所有請求共用
    let coinglass = CoinGlassClient::new(&app_config.coinglass).context("無法建立 CoinGlass 客戶端")?;
    let coingecko = CoinGeckoClient::new(&app_config.coingecko).context("無法建立 CoinGecko 客戶端")?;
    let state = AppState::new(Arc::new(coinglass), Arc::new(coingecko));

    let rest_api = RestApi::new(app_config.server.clone(), app_config.rest_api.clone(), state);
    rest_api.start().await.context("REST API 伺服器異常結束")?;

    info!("伺服器已關閉");
    Ok(())
}

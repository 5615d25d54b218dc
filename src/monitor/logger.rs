// monitor/logger.rs - 日誌初始化

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::monitor::{MonitorError, MonitorResult};

/// 初始化全域 tracing 訂閱者
///
/// `log.level` 為預設指令，`RUST_LOG` 存在時優先；`log.format` 決定
/// pretty 或 json 輸出。回傳的 guard 必須保留到程序結束，
/// 否則非阻塞寫入器中的日誌會遺失。
pub fn init_logging(log_config: &LogConfig) -> MonitorResult<WorkerGuard> {
    let filter = build_env_filter(&log_config.level)?;
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true);

    let result = match log_config.format.to_lowercase().as_str() {
        "json" => builder.json().try_init(),
        _ => builder.pretty().try_init(),
    };
    result.map_err(|e| MonitorError::LoggerError(format!("設置日誌系統失敗: {}", e)))?;

    info!(level = %log_config.level, format = %log_config.format, "日誌系統初始化完成");
    Ok(guard)
}

/// 建立過濾器：`RUST_LOG` 優先，否則使用配置的級別
pub fn build_env_filter(level: &str) -> MonitorResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level.to_lowercase())
            .map_err(|e| MonitorError::LoggerError(format!("無效的日誌級別 '{}': {}", level, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_build_env_filter_from_level() {
        std::env::remove_var("RUST_LOG");
        let filter = build_env_filter("DEBUG").unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    #[serial]
    fn test_rust_log_takes_precedence() {
        std::env::set_var("RUST_LOG", "etf_flow_tracker=trace");
        let filter = build_env_filter("info").unwrap();
        assert_eq!(filter.to_string(), "etf_flow_tracker=trace");
        std::env::remove_var("RUST_LOG");
    }
}

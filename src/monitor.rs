// monitor.rs - 監控系統模組
//
// 結構化日誌初始化與 `metrics` 指標記錄。

pub mod logger;
pub mod metrics;

pub use logger::init_logging;
pub use metrics::{install_prometheus_exporter, ApiMetrics, RequestOutcome};

/// 監控系統錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// 指標匯出器錯誤
    #[error("Metrics error: {0}")]
    MetricsError(String),

    /// 日誌初始化錯誤
    #[error("Logger error: {0}")]
    LoggerError(String),
}

/// 監控結果類型
pub type MonitorResult<T> = Result<T, MonitorError>;

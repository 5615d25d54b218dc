use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::time::Duration;

use crate::config::ValidationUtils;
use crate::monitor::{MonitorError, MonitorResult};

/// 監控指標命名空間
pub const METRIC_NAMESPACE: &str = "etf_tracker";

/// 請求處理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Success,
    UpstreamError,
    NoData,
    AggregationFailure,
    BadRequest,
}

impl RequestOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestOutcome::Success => "success",
            RequestOutcome::UpstreamError => "upstream_error",
            RequestOutcome::NoData => "no_data",
            RequestOutcome::AggregationFailure => "aggregation_failure",
            RequestOutcome::BadRequest => "bad_request",
        }
    }
}

/// API 與上游請求的指標記錄器
pub struct ApiMetrics;

impl ApiMetrics {
    /// 記錄 API 路由的處理結果
    pub fn record_request(route: &'static str, outcome: RequestOutcome) {
        counter!(
            format!("{}.requests", METRIC_NAMESPACE),
            "route" => route,
            "outcome" => outcome.as_str()
        )
        .increment(1);
    }

    /// 記錄上游請求延遲
    ///
    /// # Arguments
    /// * `provider` - 上游名稱 (如 "coinglass", "coingecko")
    /// * `endpoint` - 端點路徑
    /// * `duration` - 請求耗時
    pub fn record_upstream_latency(provider: &'static str, endpoint: &str, duration: Duration) {
        histogram!(
            format!("{}.upstream_latency_ms", METRIC_NAMESPACE),
            "provider" => provider,
            "endpoint" => endpoint.to_string()
        )
        .record(duration.as_secs_f64() * 1000.0);
    }

    /// 記錄上游請求失敗
    pub fn record_upstream_error(provider: &'static str, endpoint: &str) {
        counter!(
            format!("{}.upstream_error", METRIC_NAMESPACE),
            "provider" => provider,
            "endpoint" => endpoint.to_string()
        )
        .increment(1);
    }
}

/// 在指定地址啟動 Prometheus 抓取端點，需在 tokio 執行環境內呼叫
pub fn install_prometheus_exporter(listen: &str) -> MonitorResult<()> {
    let addr = ValidationUtils::socket_addr(listen, "metrics.listen")
        .map_err(|e| MonitorError::MetricsError(e.to_string()))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| MonitorError::MetricsError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_series_are_rendered() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            ApiMetrics::record_request("bitcoin_flows", RequestOutcome::Success);
            ApiMetrics::record_request("bitcoin_flows", RequestOutcome::Success);
            ApiMetrics::record_upstream_latency("coinglass", "etf/bitcoin/flow-history", Duration::from_millis(12));
            ApiMetrics::record_upstream_error("coinglass", "etf/bitcoin/list");
        });

        let rendered = handle.render();
        let requests = rendered
            .lines()
            .find(|line| line.starts_with("etf_tracker_requests{"))
            .expect("requests counter");
        assert!(requests.contains(r#"route="bitcoin_flows""#));
        assert!(requests.contains(r#"outcome="success""#));
        assert!(requests.ends_with(" 2"));

        assert!(rendered.contains("etf_tracker_upstream_latency_ms"));
        assert!(rendered
            .lines()
            .any(|line| line.starts_with("etf_tracker_upstream_error{") && line.contains(r#"endpoint="etf/bitcoin/list""#)));
    }

    #[test]
    fn test_invalid_listen_address() {
        assert!(install_prometheus_exporter("not-an-address").is_err());
    }
}

use serde::{Deserialize, Serialize};
use crate::config::validation::{ValidationError, ValidationUtils, Validator};

/// 應用程序配置結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub log: LogConfig,
    pub server: ServerConfig,
    pub rest_api: RestApiConfig,
    pub coinglass: CoinGlassConfig,
    pub coingecko: CoinGeckoConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.log.validate()?;
        self.server.validate()?;
        self.rest_api.validate()?;
        self.coinglass.validate()?;
        self.coingecko.validate()?;
        self.metrics.validate()?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::one_of(&self.level, &["trace", "debug", "info", "warn", "error"], "log.level")?;
        ValidationUtils::one_of(&self.format, &["pretty", "json"], "log.format")?;

        Ok(())
    }
}

/// 伺服器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 請求超時（秒）
    pub request_timeout: u64,
    pub serve_static: bool,
    pub static_files_dir: String,
}

impl Validator for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::ip_addr(&self.host, "server.host")?;
        ValidationUtils::in_range(self.port, 1, 65535, "server.port")?;
        ValidationUtils::in_range(self.request_timeout, 1, 300, "server.request_timeout")?;
        ValidationUtils::check_dependency(
            self.serve_static,
            !self.static_files_dir.trim().is_empty(),
            "server.serve_static",
            "server.static_files_dir",
        )?;

        Ok(())
    }
}

/// REST API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestApiConfig {
    pub base_path: String,
    pub cors_allow_all: bool,
    pub cors_origins: Vec<String>,
}

impl Validator for RestApiConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::mount_path(&self.base_path, "rest_api.base_path")?;

        // 如果不允許所有來源，必須指定允許的來源
        if !self.cors_allow_all && self.cors_origins.is_empty() {
            return Err(ValidationError::InvalidValue(
                "未指定允許的CORS來源，且未啟用允許所有來源".to_string(),
            ));
        }

        Ok(())
    }
}

/// CoinGlass 上游配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinGlassConfig {
    pub base_url: String,
    /// 通常經由 ETF_TRACKER__COINGLASS__API_KEY 注入
    #[serde(default)]
    pub api_key: String,
    pub timeout_secs: u64,
    /// 資金流歷史請求的 `limit` 參數
    pub max_records: u32,
}

impl Validator for CoinGlassConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::http_url(&self.base_url, "coinglass.base_url")?;
        ValidationUtils::not_empty(&self.api_key, "coinglass.api_key")?;
        ValidationUtils::in_range(self.timeout_secs, 1, 120, "coinglass.timeout_secs")?;
        ValidationUtils::in_range(self.max_records, 1, 5000, "coinglass.max_records")?;

        Ok(())
    }
}

/// CoinGecko 上游配置，`api_key` 為空時使用公開端點
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinGeckoConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Validator for CoinGeckoConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::http_url(&self.base_url, "coingecko.base_url")?;
        ValidationUtils::in_range(self.timeout_secs, 1, 120, "coingecko.timeout_secs")?;

        Ok(())
    }
}

/// Prometheus 指標配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub listen: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            listen: "0.0.0.0:9000".to_string(),
        }
    }
}

impl Validator for MetricsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled {
            ValidationUtils::socket_addr(&self.listen, "metrics.listen")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn server() -> ServerConfig {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 5000,
            request_timeout: 30,
            serve_static: true,
            static_files_dir: "frontend".to_string(),
        }
    }

    #[test]
    fn test_server_host_must_be_ip() {
        assert!(server().validate().is_ok());

        let mut config = server();
        config.host = "my-host".to_string();
        assert_matches!(config.validate(), Err(ValidationError::InvalidAddress { .. }));
    }

    #[test]
    fn test_static_dir_required_when_serving() {
        let mut config = server();
        config.static_files_dir = String::new();
        assert_matches!(config.validate(), Err(ValidationError::DependencyError { .. }));

        config.serve_static = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_path_rejects_trailing_slash() {
        let mut config = RestApiConfig {
            base_path: "/api/".to_string(),
            cors_allow_all: true,
            cors_origins: Vec::new(),
        };
        assert_matches!(config.validate(), Err(ValidationError::InvalidPath { .. }));

        config.base_path = "/".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_metrics_listen_checked_only_when_enabled() {
        let mut metrics = MetricsConfig {
            enabled: false,
            listen: "not-an-address".to_string(),
        };
        assert!(metrics.validate().is_ok());

        metrics.enabled = true;
        assert_matches!(metrics.validate(), Err(ValidationError::InvalidAddress { .. }));
    }
}

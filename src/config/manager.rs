use once_cell::sync::OnceCell;
use config::ConfigError;
use std::path::Path;
use tracing::{debug, warn};
use crate::config::types::ApplicationConfig;
use crate::config::loader::{ConfigLoader, Environment};
use crate::config::validation::Validator;

// 全局配置實例
static CONFIG: OnceCell<ApplicationConfig> = OnceCell::new();

/// 初始化配置（在應用程序啟動時調用），重複調用回傳第一次載入的配置
pub fn init_config(config_dir: &Path, env: Environment) -> Result<&'static ApplicationConfig, ConfigError> {
    if let Some(existing) = CONFIG.get() {
        warn!("配置已經被初始化，跳過重複初始化");
        return Ok(existing);
    }

    let app_config = ApplicationConfig::load_from(config_dir, env)?;
    debug!("配置初始化成功，環境：{:?}", env);
    Ok(CONFIG.get_or_init(|| app_config))
}

/// ApplicationConfig 加載方法實現
impl ApplicationConfig {
    /// 從指定目錄與環境加載配置
    pub fn load_from(config_dir: &Path, env: Environment) -> Result<Self, ConfigError> {
        debug!("從環境加載配置: {:?}", env);
        let config_source = ConfigLoader::load_from(config_dir, env)?;

        // 使用 serde 反序列化配置
        let app_config: ApplicationConfig = config_source.try_deserialize()?;

        // 驗證失敗只記錄警告
        if let Err(err) = app_config.validate() {
            warn!("配置驗證失敗: {}", err);
        } else {
            debug!("配置驗證通過");
        }

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::{env, fs};

    const SAMPLE: &str = r#"
[log]
level = "info"
format = "json"

[server]
host = "127.0.0.1"
port = 5000
request_timeout = 30
serve_static = false
static_files_dir = ""

[rest_api]
base_path = "/api"
cors_allow_all = true
cors_origins = []

[coinglass]
base_url = "https://open-api-v4.coinglass.com/api"
api_key = "file-key"
timeout_secs = 30
max_records = 1000

[coingecko]
base_url = "https://api.coingecko.com/api/v3"
timeout_secs = 30
"#;

    #[test]
    #[serial]
    fn test_load_application_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("production.toml"), SAMPLE).unwrap();

        env::set_var("ETF_TRACKER__COINGLASS__API_KEY", "env-key");
        let config = ApplicationConfig::load_from(dir.path(), Environment::Production)
            .expect("無法加載測試配置");
        env::remove_var("ETF_TRACKER__COINGLASS__API_KEY");

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.coinglass.api_key, "env-key");
        assert_eq!(config.coinglass.max_records, 1000);
        assert!(config.coingecko.api_key.is_empty());
        assert!(!config.metrics.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ApplicationConfig::load_from(dir.path(), Environment::Development).is_err());
    }
}

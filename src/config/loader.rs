use config::{Config, ConfigError, Environment as ConfigEnvironment, File};
use std::env;
use std::path::{Path, PathBuf};

/// 選擇環境的環境變數
pub const ENV_VAR: &str = "ETF_TRACKER_ENV";
/// 覆寫配置值的環境變數前綴，例如 ETF_TRACKER__COINGLASS__API_KEY
pub const ENV_PREFIX: &str = "ETF_TRACKER";

/// 環境類型枚舉
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// 從環境變數取得當前環境設定
    pub fn from_env() -> Self {
        Self::parse(&env::var(ENV_VAR).unwrap_or_else(|_| "development".into()))
    }

    /// 解析環境名稱，未知名稱視為開發環境
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    /// 轉換為配置文件名
    pub fn as_filename(&self) -> &'static str {
        match self {
            Environment::Development => "development.toml",
            Environment::Production => "production.toml",
        }
    }
}

/// 配置加載器，負責根據環境加載適當的配置
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置目錄，來自 CONFIG_DIR，預設為 `config`
    pub fn config_dir() -> PathBuf {
        PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".into()))
    }

    /// 從指定目錄載入環境配置，環境變數優先於文件
    pub fn load_from(config_dir: &Path, env: Environment) -> Result<Config, ConfigError> {
        let config_path = config_dir.join(env.as_filename());

        Config::builder()
            .add_source(File::from(config_path))
            .add_source(
                ConfigEnvironment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
    }
}

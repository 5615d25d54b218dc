use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// 配置驗證錯誤
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("缺少必要配置項: {0}")]
    MissingField(String),

    #[error("無效的配置值: {0}")]
    InvalidValue(String),

    #[error("配置範圍錯誤: {field} 的值 {value} 不在範圍 {min}..{max} 內")]
    RangeError {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("依賴錯誤: {dependent} 依賴於 {dependency} 的配置")]
    DependencyError { dependent: String, dependency: String },

    #[error("無效的位址: {field} = '{value}'")]
    InvalidAddress { field: String, value: String },

    #[error("無效的路徑: {field} = '{value}'，必須以 '/' 開頭且不以 '/' 結尾")]
    InvalidPath { field: String, value: String },
}

/// 配置區段驗證
pub trait Validator {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// 各配置區段共用的檢查
pub struct ValidationUtils;

impl ValidationUtils {
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + ToString,
    {
        if value < min || value > max {
            return Err(ValidationError::RangeError {
                field: field.to_string(),
                value: value.to_string(),
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(())
    }

    pub fn one_of(value: &str, options: &[&str], field: &str) -> Result<(), ValidationError> {
        if options.iter().any(|option| option.eq_ignore_ascii_case(value)) {
            return Ok(());
        }
        Err(ValidationError::InvalidValue(format!(
            "{} 的值 {} 不是有效選項: {:?}",
            field, value, options
        )))
    }

    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field.to_string()));
        }
        Ok(())
    }

    /// `has_dependent` 成立時 `has_dependency` 也必須成立
    pub fn check_dependency(
        has_dependent: bool,
        has_dependency: bool,
        dependent: &str,
        dependency: &str,
    ) -> Result<(), ValidationError> {
        if has_dependent && !has_dependency {
            return Err(ValidationError::DependencyError {
                dependent: dependent.to_string(),
                dependency: dependency.to_string(),
            });
        }
        Ok(())
    }

    /// 綁定用的 IP 位址（`server.host`）
    pub fn ip_addr(value: &str, field: &str) -> Result<IpAddr, ValidationError> {
        value.trim().parse().map_err(|_| ValidationError::InvalidAddress {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    /// `host:port` 形式的監聽位址（`metrics.listen`）
    pub fn socket_addr(value: &str, field: &str) -> Result<SocketAddr, ValidationError> {
        value.trim().parse().map_err(|_| ValidationError::InvalidAddress {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    /// API 掛載路徑：以 '/' 開頭，除根路徑外不得以 '/' 結尾
    pub fn mount_path(value: &str, field: &str) -> Result<(), ValidationError> {
        let valid = value.starts_with('/') && (value == "/" || !value.ends_with('/'));
        if !valid {
            return Err(ValidationError::InvalidPath {
                field: field.to_string(),
                value: value.to_string(),
            });
        }
        Ok(())
    }

    /// 上游 API 根網址須為 http(s)
    pub fn http_url(value: &str, field: &str) -> Result<(), ValidationError> {
        Self::not_empty(value, field)?;
        if value.starts_with("https://") || value.starts_with("http://") {
            return Ok(());
        }
        Err(ValidationError::InvalidValue(format!("{} 必須是 http(s) 網址: {}", field, value)))
    }
}

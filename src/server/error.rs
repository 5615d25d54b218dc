use thiserror::Error;

/// 伺服器錯誤類型
#[derive(Error, Debug)]
pub enum ServerError {
    /// 配置錯誤
    #[error("配置錯誤: {0}")]
    Config(String),

    /// IO 錯誤（綁定埠號等）
    #[error("IO 錯誤: {0}")]
    Io(#[from] std::io::Error),

    /// 運行時錯誤
    #[error("運行時錯誤: {0}")]
    Runtime(String),
}

/// 伺服器結果類型別名
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err: ServerError = io.into();
        assert!(err.to_string().starts_with("IO 錯誤"));
    }
}

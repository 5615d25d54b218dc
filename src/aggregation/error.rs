use thiserror::Error;

/// 聚合錯誤
///
/// 錯誤訊息即為回應主體中的 `error` 欄位內容。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregationError {
    /// 上游回應沒有記錄容器（單一資產）
    #[error("Invalid data")]
    EmptyInput,

    /// 任一上游回應沒有記錄容器（合併資產）
    #[error("Invalid data")]
    InvalidData,

    /// 記錄容器存在但為空
    #[error("No data available")]
    NoData,

    /// 視窗內沒有記錄（單一資產）
    #[error("No data for last {days} days")]
    NoDataInWindow { days: i64 },

    /// 任一資產在視窗內沒有記錄（合併資產）
    #[error("Insufficient data for {days} days")]
    InsufficientData { days: i64 },

    /// 時間戳無法轉換為日曆日
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// 加總結果不是有限數值
    #[error("Invalid flow value")]
    NonFiniteFlow,

    /// 視窗天數超出允許範圍
    #[error("Invalid window: {0} days")]
    InvalidWindow(i64),
}

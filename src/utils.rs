// utils.rs - 公共工具模組
//
// 提供時間轉換與序列化的通用輔助函數。

pub mod serde_helpers;
pub mod time_utils;

pub use time_utils::{calendar_day, days_to_ms, timestamp_ms_to_datetime, MILLIS_PER_DAY};

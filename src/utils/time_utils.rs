// time_utils.rs
//
// 提供時間轉換相關的工具函數：
// 1. 毫秒紀元時間戳與 chrono 類型之間的轉換
// 2. 依指定時區把時間戳歸入日曆日

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// 一天的毫秒數
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// 將毫秒時間戳轉換為 DateTime<Utc>，超出 chrono 範圍時回傳 None
pub fn timestamp_ms_to_datetime(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ts)
}

/// 將毫秒時間戳歸入 `tz` 時區下的日曆日
pub fn calendar_day<Tz: TimeZone>(ts: i64, tz: &Tz) -> Option<NaiveDate> {
    timestamp_ms_to_datetime(ts).map(|dt| dt.with_timezone(tz).date_naive())
}

/// 天數轉毫秒
pub fn days_to_ms(days: i64) -> i64 {
    days.saturating_mul(MILLIS_PER_DAY)
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::serde_helpers::{lenient_f64, lenient_i64, lenient_string_opt};

/// 單筆 ETF 資金流記錄
///
/// 欄位缺失或為 null 時取 0，因此缺少時間戳的記錄會落在紀元起點，
/// 任何尾隨視窗都不會納入它。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    #[serde(rename = "timestamp", default, deserialize_with = "lenient_i64")]
    timestamp_ms: i64,
    #[serde(rename = "flow_usd", default, deserialize_with = "lenient_f64")]
    flow_usd: f64,
}

impl FlowRecord {
    pub fn new(timestamp_ms: i64, flow_usd: f64) -> Self {
        Self {
            timestamp_ms,
            flow_usd,
        }
    }

    /// 毫秒紀元時間戳
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    /// 美元淨流量，流入為正、流出為負
    pub fn flow_usd(&self) -> f64 {
        self.flow_usd
    }
}

/// 上游資金流歷史回應
///
/// `data` 缺失或為 null 表示回應沒有記錄容器，與空列表不同。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowPayload {
    #[serde(default, deserialize_with = "lenient_string_opt", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<FlowRecord>>,
}

impl FlowPayload {
    pub fn with_records(records: Vec<FlowRecord>) -> Self {
        Self {
            code: Some("0".to_string()),
            msg: Some("success".to_string()),
            data: Some(records),
        }
    }

    pub fn records(&self) -> Option<&[FlowRecord]> {
        self.data.as_deref()
    }

    /// 記錄數，容器缺失時為 0
    pub fn record_count(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }
}

/// 日曆日到資金流的映射，同日重複寫入時後者覆蓋前者
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyFlowMap(BTreeMap<NaiveDate, f64>);

impl DailyFlowMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, flow: f64) {
        self.0.insert(date, flow);
    }

    /// 查詢某日流量，缺少該日時回傳 0
    pub fn flow_on(&self, date: &NaiveDate) -> f64 {
        self.0.get(date).copied().unwrap_or(0.0)
    }

    /// 依日期遞增排列的日期
    pub fn dates(&self) -> impl DoubleEndedIterator<Item = &NaiveDate> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &f64)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_distinguishes_missing_and_empty() {
        let missing: FlowPayload = serde_json::from_str(r#"{"code": "0", "msg": "success"}"#).unwrap();
        assert!(missing.records().is_none());
        assert_eq!(missing.record_count(), 0);

        let null: FlowPayload = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(null.records().is_none());

        let empty: FlowPayload = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(empty.records(), Some(&[][..]));
    }

    #[test]
    fn test_record_fields_default_to_zero() {
        let payload: FlowPayload = serde_json::from_str(
            r#"{"code": 0, "data": [
                {"timestamp": 1704067200000, "flow_usd": 125000000.5, "price_usd": 42000},
                {"flow_usd": 10},
                {"timestamp": 1704153600000}
            ]}"#,
        )
        .unwrap();

        let records = payload.records().unwrap();
        assert_eq!(payload.code.as_deref(), Some("0"));
        assert_eq!(records[0], FlowRecord::new(1_704_067_200_000, 125_000_000.5));
        assert_eq!(records[1], FlowRecord::new(0, 10.0));
        assert_eq!(records[2], FlowRecord::new(1_704_153_600_000, 0.0));
    }

    #[test]
    fn test_daily_map_last_write_wins_and_zero_default() {
        let day0 = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let day1 = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();

        let mut map = DailyFlowMap::new();
        map.insert(day1, 5.0);
        map.insert(day0, 100.0);
        map.insert(day0, -30.0);

        assert_eq!(map.len(), 2);
        assert_eq!(map.flow_on(&day0), -30.0);
        assert_eq!(map.flow_on(&NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()), 0.0);
        assert_eq!(map.dates().copied().collect::<Vec<_>>(), vec![day0, day1]);
    }
}

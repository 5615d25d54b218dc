use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 單一資產圖表中的日數據點
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub flow: f64,
}

/// 合併圖表中的日數據點，缺少的一方為 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedPoint {
    pub date: NaiveDate,
    pub btc_flow: f64,
    pub eth_flow: f64,
}

/// 單一資產的資金流摘要
///
/// `total_flow` 與 `series` 由請求的視窗決定；
/// `last_7d`、`last_30d`、`last_90d` 永遠以完整記錄列表計算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFlowSummary {
    pub label: String,
    pub total_flow: f64,
    pub last_7d: f64,
    pub last_30d: f64,
    pub last_90d: f64,
    pub series: Vec<DailyPoint>,
    pub point_count: usize,
    pub date_range_label: String,
}

/// BTC + ETH 合併摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedFlowSummary {
    pub total_btc_flow: f64,
    pub total_eth_flow: f64,
    pub total_combined: f64,
    pub series: Vec<CombinedPoint>,
    pub point_count: usize,
    pub date_range_label: String,
}

/// 產生 "{first} to {last}" 標籤，沒有日期時為空字串
pub fn date_range_label<'a, I>(mut dates: I) -> String
where
    I: DoubleEndedIterator<Item = &'a NaiveDate>,
{
    match dates.next() {
        Some(first) => {
            let last = dates.next_back().unwrap_or(first);
            format!("{} to {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d"))
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let summary = AssetFlowSummary {
            label: "Bitcoin".to_string(),
            total_flow: 1.0,
            last_7d: 2.0,
            last_30d: 3.0,
            last_90d: 4.0,
            series: vec![DailyPoint { date: day, flow: 1.0 }],
            point_count: 1,
            date_range_label: "2024-06-01 to 2024-06-01".to_string(),
        };

        let json = serde_json::to_value(&summary).unwrap();
        for key in ["label", "totalFlow", "last7d", "last30d", "last90d", "series", "pointCount", "dateRangeLabel"] {
            assert!(json.get(key).is_some(), "缺少欄位 {}", key);
        }
        assert_eq!(json["series"][0]["date"], "2024-06-01");

        let point = serde_json::to_value(CombinedPoint { date: day, btc_flow: 1.0, eth_flow: 0.0 }).unwrap();
        assert_eq!(point["btcFlow"], 1.0);
        assert_eq!(point["ethFlow"], 0.0);
    }

    #[test]
    fn test_date_range_label() {
        let d0 = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();

        assert_eq!(date_range_label(Vec::<NaiveDate>::new().iter()), "");
        assert_eq!(date_range_label([d0].iter()), "2024-06-01 to 2024-06-01");
        assert_eq!(date_range_label([d0, d1].iter()), "2024-06-01 to 2024-06-09");
    }
}

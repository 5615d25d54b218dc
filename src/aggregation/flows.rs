use chrono::{DateTime, Local, TimeZone};
use std::collections::BTreeSet;

use crate::aggregation::{AggregateResult, AggregationError};
use crate::domain_types::summary::date_range_label;
use crate::domain_types::{
    AssetFlowSummary, CombinedFlowSummary, CombinedPoint, DailyFlowMap, DailyPoint, FlowRecord,
    WindowSpec,
};
use crate::utils::time_utils::{calendar_day, days_to_ms};

/// 固定滾動視窗（天），與請求的視窗無關
pub const FIXED_WINDOW_DAYS: [i64; 3] = [7, 30, 90];

/// 計算單一資產摘要，以本地時鐘的當前時刻為參考點
pub fn summarize(
    records: Option<&[FlowRecord]>,
    window_days: i64,
    label: &str,
) -> AggregateResult<AssetFlowSummary> {
    summarize_at(records, window_days, label, Local::now())
}

/// 計算單一資產摘要，參考時刻與日曆日時區都取自 `now`
pub fn summarize_at<Tz: TimeZone>(
    records: Option<&[FlowRecord]>,
    window_days: i64,
    label: &str,
    now: DateTime<Tz>,
) -> AggregateResult<AssetFlowSummary> {
    try_summarize(records, window_days, label, &now).into()
}

/// 計算 BTC + ETH 合併摘要，以本地時鐘的當前時刻為參考點
pub fn summarize_combined(
    btc_records: Option<&[FlowRecord]>,
    eth_records: Option<&[FlowRecord]>,
    window_days: i64,
) -> AggregateResult<CombinedFlowSummary> {
    summarize_combined_at(btc_records, eth_records, window_days, Local::now())
}

/// 計算 BTC + ETH 合併摘要，參考時刻與日曆日時區都取自 `now`
pub fn summarize_combined_at<Tz: TimeZone>(
    btc_records: Option<&[FlowRecord]>,
    eth_records: Option<&[FlowRecord]>,
    window_days: i64,
    now: DateTime<Tz>,
) -> AggregateResult<CombinedFlowSummary> {
    try_summarize_combined(btc_records, eth_records, window_days, &now).into()
}

fn try_summarize<Tz: TimeZone>(
    records: Option<&[FlowRecord]>,
    window_days: i64,
    label: &str,
    now: &DateTime<Tz>,
) -> Result<AssetFlowSummary, AggregationError> {
    let records = records.ok_or(AggregationError::EmptyInput)?;
    if records.is_empty() {
        return Err(AggregationError::NoData);
    }

    let window = WindowSpec::new(window_days)?;
    let now_ms = now.timestamp_millis();

    let filtered = filter_window(records, &window, now_ms);
    if filtered.is_empty() {
        return Err(AggregationError::NoDataInWindow { days: window.days() });
    }

    let total_flow = finite(sum_flows(&filtered))?;
    let [last_7d, last_30d, last_90d] = FIXED_WINDOW_DAYS.map(|days| trailing_sum(records, days, now_ms));
    let (last_7d, last_30d, last_90d) = (finite(last_7d)?, finite(last_30d)?, finite(last_90d)?);

    let daily = bucket_by_day(&filtered, &now.timezone())?;
    let series: Vec<DailyPoint> = daily
        .iter()
        .map(|(date, flow)| DailyPoint {
            date: *date,
            flow: *flow,
        })
        .collect();

    Ok(AssetFlowSummary {
        label: label.to_string(),
        total_flow,
        last_7d,
        last_30d,
        last_90d,
        point_count: series.len(),
        date_range_label: date_range_label(daily.dates()),
        series,
    })
}

fn try_summarize_combined<Tz: TimeZone>(
    btc_records: Option<&[FlowRecord]>,
    eth_records: Option<&[FlowRecord]>,
    window_days: i64,
    now: &DateTime<Tz>,
) -> Result<CombinedFlowSummary, AggregationError> {
    let (btc_records, eth_records) = match (btc_records, eth_records) {
        (Some(btc), Some(eth)) => (btc, eth),
        _ => return Err(AggregationError::InvalidData),
    };

    let window = WindowSpec::new(window_days)?;
    let now_ms = now.timestamp_millis();

    let btc_filtered = filter_window(btc_records, &window, now_ms);
    let eth_filtered = filter_window(eth_records, &window, now_ms);
    if btc_filtered.is_empty() || eth_filtered.is_empty() {
        return Err(AggregationError::InsufficientData { days: window.days() });
    }

    let total_btc_flow = finite(sum_flows(&btc_filtered))?;
    let total_eth_flow = finite(sum_flows(&eth_filtered))?;
    let total_combined = finite(total_btc_flow + total_eth_flow)?;

    let tz = now.timezone();
    let btc_daily = bucket_by_day(&btc_filtered, &tz)?;
    let eth_daily = bucket_by_day(&eth_filtered, &tz)?;

    let all_dates: BTreeSet<_> = btc_daily.dates().chain(eth_daily.dates()).copied().collect();
    let series: Vec<CombinedPoint> = all_dates
        .iter()
        .map(|date| CombinedPoint {
            date: *date,
            btc_flow: btc_daily.flow_on(date),
            eth_flow: eth_daily.flow_on(date),
        })
        .collect();

    Ok(CombinedFlowSummary {
        total_btc_flow,
        total_eth_flow,
        total_combined,
        point_count: series.len(),
        date_range_label: date_range_label(all_dates.iter()),
        series,
    })
}

/// 依時間戳遞增排序後逐筆寫入日曆日映射，同日以最後一筆為準（不加總）
pub fn bucket_by_day<Tz: TimeZone>(
    records: &[FlowRecord],
    tz: &Tz,
) -> Result<DailyFlowMap, AggregationError> {
    let mut ordered = records.to_vec();
    ordered.sort_by_key(FlowRecord::timestamp_ms);

    let mut daily = DailyFlowMap::new();
    for record in ordered {
        let day = calendar_day(record.timestamp_ms(), tz)
            .ok_or(AggregationError::InvalidTimestamp(record.timestamp_ms()))?;
        daily.insert(day, record.flow_usd());
    }
    Ok(daily)
}

fn filter_window(records: &[FlowRecord], window: &WindowSpec, now_ms: i64) -> Vec<FlowRecord> {
    records
        .iter()
        .filter(|record| window.contains(record.timestamp_ms(), now_ms))
        .copied()
        .collect()
}

fn sum_flows(records: &[FlowRecord]) -> f64 {
    records.iter().map(FlowRecord::flow_usd).sum()
}

fn trailing_sum(records: &[FlowRecord], days: i64, now_ms: i64) -> f64 {
    let cutoff = now_ms.saturating_sub(days_to_ms(days));
    records
        .iter()
        .filter(|record| record.timestamp_ms() >= cutoff)
        .map(FlowRecord::flow_usd)
        .sum()
}

fn finite(value: f64) -> Result<f64, AggregationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AggregationError::NonFiniteFlow)
    }
}

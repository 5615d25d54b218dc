use crate::aggregation::AggregationError;
use crate::utils::time_utils::days_to_ms;

/// 視窗天數上限（約一百年）
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// 尾隨時間視窗，單位為天
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowSpec {
    days: i64,
}

impl WindowSpec {
    /// 建立視窗，天數必須在 1..=MAX_WINDOW_DAYS 之間
    pub fn new(days: i64) -> Result<Self, AggregationError> {
        if !(1..=MAX_WINDOW_DAYS).contains(&days) {
            return Err(AggregationError::InvalidWindow(days));
        }
        Ok(Self { days })
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    /// 以 `now_ms` 為參考點計算納入下限（含）
    pub fn cutoff_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(days_to_ms(self.days))
    }

    /// 記錄時間戳是否落在視窗內
    pub fn contains(&self, timestamp_ms: i64, now_ms: i64) -> bool {
        timestamp_ms >= self.cutoff_ms(now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time_utils::MILLIS_PER_DAY;
    use assert_matches::assert_matches;

    #[test]
    fn test_window_bounds() {
        assert!(WindowSpec::new(1).is_ok());
        assert!(WindowSpec::new(MAX_WINDOW_DAYS).is_ok());
        assert_matches!(WindowSpec::new(0), Err(AggregationError::InvalidWindow(0)));
        assert_matches!(WindowSpec::new(-3), Err(AggregationError::InvalidWindow(-3)));
        assert_matches!(
            WindowSpec::new(MAX_WINDOW_DAYS + 1),
            Err(AggregationError::InvalidWindow(_))
        );
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let window = WindowSpec::new(7).unwrap();
        let now = 100 * MILLIS_PER_DAY;
        let cutoff = window.cutoff_ms(now);

        assert_eq!(cutoff, 93 * MILLIS_PER_DAY);
        assert!(window.contains(cutoff, now));
        assert!(!window.contains(cutoff - 1, now));
        // 未來時間戳沒有上限
        assert!(window.contains(now + MILLIS_PER_DAY, now));
    }
}

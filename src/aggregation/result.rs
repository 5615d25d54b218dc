use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::aggregation::AggregationError;

/// 帶標記的聚合結果
///
/// 序列化為 `{"success": true, ...摘要欄位}` 或
/// `{"success": false, "error": "..."}`。
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult<T> {
    outcome: Result<T, AggregationError>,
}

impl<T> AggregateResult<T> {
    pub fn success(summary: T) -> Self {
        Self { outcome: Ok(summary) }
    }

    pub fn failure(error: AggregationError) -> Self {
        Self { outcome: Err(error) }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn summary(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&AggregationError> {
        self.outcome.as_ref().err()
    }

    pub fn as_result(&self) -> Result<&T, &AggregationError> {
        self.outcome.as_ref()
    }

    pub fn into_result(self) -> Result<T, AggregationError> {
        self.outcome
    }
}

impl<T> From<Result<T, AggregationError>> for AggregateResult<T> {
    fn from(outcome: Result<T, AggregationError>) -> Self {
        Self { outcome }
    }
}

impl<T: Serialize> Serialize for AggregateResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.outcome {
            Ok(summary) => {
                #[derive(serde::Serialize)]
                struct Tagged<'a, T> {
                    success: bool,
                    #[serde(flatten)]
                    summary: &'a T,
                }
                Tagged {
                    success: true,
                    summary,
                }
                .serialize(serializer)
            }
            Err(error) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", &error.to_string())?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        total_flow: f64,
    }

    #[test]
    fn test_success_is_flattened() {
        let result = AggregateResult::success(Sample { total_flow: 12.5 });
        assert!(result.is_success());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": true, "totalFlow": 12.5})
        );
    }

    #[test]
    fn test_failure_carries_message() {
        let result: AggregateResult<Sample> =
            Err(AggregationError::NoDataInWindow { days: 7 }).into();
        assert!(!result.is_success());
        assert_eq!(result.error(), Some(&AggregationError::NoDataInWindow { days: 7 }));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": false, "error": "No data for last 7 days"})
        );
    }
}

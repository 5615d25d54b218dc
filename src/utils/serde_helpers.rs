// utils/serde_helpers.rs - 序列化與反序列化輔助函數
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// 上游欄位可能是數字、數字字串或 null
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

/// 將數字、數字字串或 null 反序列化為 f64
///
/// 上游資料源的數值欄位型別並不一致，這個函數把 null 與空字串
/// 視為 0，其他無法解析的內容則回報反序列化錯誤。
/// 欄位缺失時需搭配 `#[serde(default)]` 使用。
///
/// # 使用範例
///
/// ```
/// use serde::Deserialize;
/// use etf_flow_tracker::utils::serde_helpers::lenient_f64;
///
/// #[derive(Deserialize)]
/// struct Record {
///     #[serde(default, deserialize_with = "lenient_f64")]
///     flow_usd: f64,
/// }
///
/// let record: Record = serde_json::from_str(r#"{"flow_usd": "12.5"}"#).unwrap();
/// assert_eq!(record.flow_usd, 12.5);
/// ```
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LenientNumber>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(LenientNumber::Int(v)) => Ok(v as f64),
        Some(LenientNumber::Float(v)) => Ok(v),
        Some(LenientNumber::Text(s)) => parse_text(&s, 0.0),
    }
}

/// 將數字、數字字串或 null 反序列化為 i64（毫秒時間戳等整數欄位）
///
/// 浮點數會被截斷；非有限值回報錯誤。
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LenientNumber>::deserialize(deserializer)? {
        None => Ok(0),
        Some(LenientNumber::Int(v)) => Ok(v),
        Some(LenientNumber::Float(v)) if v.is_finite() => Ok(v as i64),
        Some(LenientNumber::Float(v)) => Err(de::Error::custom(format!("非有限數值: {}", v))),
        Some(LenientNumber::Text(s)) => parse_text(&s, 0),
    }
}

/// 將字串或數字反序列化為 `Option<String>`，null 為 None
///
/// 供應商回應的 `code` 欄位有時是 `"0"`，有時是 `0`。
pub fn lenient_string_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LenientNumber>::deserialize(deserializer)?.map(|value| match value {
        LenientNumber::Int(v) => v.to_string(),
        LenientNumber::Float(v) => v.to_string(),
        LenientNumber::Text(s) => s,
    }))
}

fn parse_text<T, E>(s: &str, empty: T) -> Result<T, E>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    E: de::Error,
{
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(empty);
    }
    trimmed
        .parse::<T>()
        .map_err(|e| E::custom(format!("無法解析數值 '{}': {}", trimmed, e)))
}

//! Common utilities shared across the database tools.
//!
//! Result shaping, default limits, and the lenient decoders used for
//! timestamps and version numbers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use sqlx::mysql::MySqlRow;

use crate::core::database::row_to_json;
use crate::domains::tools::ToolError;

/// Default row count for `get_table_rows`.
pub const DEFAULT_ROW_LIMIT: u32 = 100;

/// Default result count for the search tools.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Create a success result with text content.
pub fn text_result(message: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(message)])
}

/// Create a success result carrying JSON.
///
/// The text content holds the bare JSON (what a model reads); the structured
/// content wraps it under `key` because MCP requires an object there.
pub fn json_result(key: &str, value: Value) -> Result<CallToolResult, ToolError> {
    let text = serde_json::to_string(&value)?;
    let mut structured = Map::new();
    structured.insert(key.to_string(), value);

    Ok(CallToolResult {
        content: vec![Content::text(text)],
        structured_content: Some(Value::Object(structured)),
        is_error: Some(false),
        meta: None,
    })
}

/// Convert fetched rows into a JSON array of objects.
pub fn rows_to_json(rows: &[MySqlRow]) -> Value {
    Value::Array(rows.iter().map(|r| Value::Object(row_to_json(r))).collect())
}

/// Parse a caller-supplied timestamp.
///
/// Accepts `2024-05-01T09:30:00[.fff]`, `2024-05-01 09:30:00[.fff]`, a bare
/// date (midnight), or an RFC 3339 value with offset, which is converted to
/// UTC.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.naive_utc())
        .map_err(|_| {
            format!(
                "invalid timestamp '{}': expected ISO-8601 like 2024-05-01T09:30:00",
                value
            )
        })
}

/// Serde adapter for [`parse_timestamp`].
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Accept a string or a number where the column is text-like.
///
/// Models regularly send `"version": 2` for a `"2"` column.
pub fn deserialize_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(parse_timestamp("2024-05-01T09:30:00").unwrap(), ts(9, 30, 0));
        assert_eq!(parse_timestamp("2024-05-01 09:30:00").unwrap(), ts(9, 30, 0));
        assert_eq!(
            parse_timestamp("2024-05-01T11:30:00+02:00").unwrap(),
            ts(9, 30, 0)
        );
        assert_eq!(parse_timestamp("2024-05-01T09:30:00Z").unwrap(), ts(9, 30, 0));
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_parse_timestamp_date_only_is_midnight() {
        assert_eq!(parse_timestamp("2024-05-01").unwrap(), ts(0, 0, 0));
        assert_eq!(parse_timestamp(" 2024-05-01 ").unwrap(), ts(0, 0, 0));
        assert!(parse_timestamp("2024-13-01").is_err());
    }

    #[test]
    fn test_json_result_shapes() {
        let result = json_result("tables", serde_json::json!(["a", "b"])).unwrap();
        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert_eq!(text, r#"["a","b"]"#);
        assert_eq!(
            result.structured_content,
            Some(serde_json::json!({ "tables": ["a", "b"] }))
        );
    }

    #[test]
    fn test_deserialize_opt_text_accepts_numbers() {
        #[derive(Deserialize)]
        struct P {
            #[serde(default, deserialize_with = "deserialize_opt_text")]
            version: Option<String>,
        }
        let p: P = serde_json::from_value(serde_json::json!({ "version": 2 })).unwrap();
        assert_eq!(p.version.as_deref(), Some("2"));
        let p: P = serde_json::from_value(serde_json::json!({ "version": null })).unwrap();
        assert_eq!(p.version, None);
        let p: P = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(p.version, None);
        assert!(serde_json::from_value::<P>(serde_json::json!({ "version": [1] })).is_err());
    }
}

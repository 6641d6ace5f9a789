//! Conversion of driver rows into plain JSON.
//!
//! Nothing driver-specific leaves a tool call: rows become
//! `serde_json::Map`s keyed by column name.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use sqlx::mysql::MySqlRow;
use sqlx::types::{Decimal, Json};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use tracing::warn;

/// Render a naive timestamp as ISO-8601 (`2024-05-01T09:30:00`, fractional
/// seconds only when non-zero).
pub fn iso_timestamp(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Convert every column of `row` into a JSON value, keyed by column name.
pub fn row_to_json(row: &MySqlRow) -> Map<String, Value> {
    row.columns()
        .iter()
        .map(|column| {
            let idx = column.ordinal();
            let value = column_to_json(row, idx, column.type_info().name());
            (column.name().to_string(), value)
        })
        .collect()
}

fn column_to_json(row: &MySqlRow, idx: usize, type_name: &str) -> Value {
    match row.try_get_raw(idx) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(_) => {}
        Err(e) => {
            warn!("Cannot read column {}: {}", idx, e);
            return Value::Null;
        }
    }

    if let Some(value) = decode_typed(row, idx, type_name) {
        return value;
    }

    // Types without a dedicated mapping still usually decode as text or bytes.
    if let Ok(text) = row.try_get::<String, _>(idx) {
        return Value::String(text);
    }
    if let Ok(bytes) = row.try_get::<Vec<u8>, _>(idx) {
        return bytes_to_json(bytes);
    }

    warn!("Unsupported column type {} at index {}", type_name, idx);
    Value::Null
}

fn decode_typed(row: &MySqlRow, idx: usize, type_name: &str) -> Option<Value> {
    match type_name {
        "BOOLEAN" => row.try_get::<bool, _>(idx).ok().map(Value::from),
        "BIT" => row.try_get::<u64, _>(idx).ok().map(Value::from),
        name if name.ends_with("UNSIGNED") => row.try_get::<u64, _>(idx).ok().map(Value::from),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            row.try_get::<i64, _>(idx).ok().map(Value::from)
        }
        "FLOAT" => row
            .try_get::<f32, _>(idx)
            .ok()
            .map(|v| Value::from(f64::from(v))),
        "DOUBLE" => row.try_get::<f64, _>(idx).ok().map(Value::from),
        // Decimals keep their exact textual form.
        "DECIMAL" => row
            .try_get::<Decimal, _>(idx)
            .ok()
            .map(|v| Value::String(v.to_string())),
        "DATETIME" => row
            .try_get::<NaiveDateTime, _>(idx)
            .ok()
            .map(|v| Value::String(iso_timestamp(&v))),
        "TIMESTAMP" => row
            .try_get::<DateTime<Utc>, _>(idx)
            .ok()
            .map(|v| Value::String(v.to_rfc3339_opts(SecondsFormat::AutoSi, true))),
        "DATE" => row
            .try_get::<NaiveDate, _>(idx)
            .ok()
            .map(|v| Value::String(v.to_string())),
        "TIME" => row
            .try_get::<NaiveTime, _>(idx)
            .ok()
            .map(|v| Value::String(v.to_string())),
        "JSON" => row
            .try_get::<Json<Value>, _>(idx)
            .ok()
            .map(|Json(v)| v),
        // `_bin` collated text columns carry the binary flag and arrive here too.
        "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            row.try_get::<Vec<u8>, _>(idx).ok().map(bytes_to_json)
        }
        "GEOMETRY" => row
            .try_get::<Vec<u8>, _>(idx)
            .ok()
            .map(|v| Value::String(BASE64.encode(v))),
        _ => None,
    }
}

/// UTF-8 bytes become a string, anything else base64.
fn bytes_to_json(bytes: Vec<u8>) -> Value {
    match String::from_utf8(bytes) {
        Ok(text) => Value::String(text),
        Err(e) => Value::String(BASE64.encode(e.into_bytes())),
    }
}

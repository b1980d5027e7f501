//! JSON codec for records
//!
//! Records travel as JSON arrays, one value per column. Values are decoded
//! according to the column type of the schema they belong to.

use super::value::{NullToken, Record, Value};
use crate::error::{Error, Result};
use crate::schema::{Column, ColumnType, Schema};
use crate::types::JsonValue;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// Decode a JSON record against a schema
///
/// For an empty schema the record is opaque: a JSON array becomes one value
/// per element, anything else becomes a single-value record. For a
/// non-empty schema the input must be an array; elements beyond the
/// schema's columns are decoded without a type.
pub fn decode_record(json: &JsonValue, schema: &Schema) -> Result<Record> {
    decode_record_with(json, schema, &NullToken::none())
}

/// Decode a JSON record, treating strings equal to the null token as null
///
/// The token is checked before typed decoding, so it stands for null in
/// every typed column and not only in text columns.
pub fn decode_record_with(
    json: &JsonValue,
    schema: &Schema,
    null_token: &NullToken,
) -> Result<Record> {
    if schema.is_empty() {
        return Ok(match json {
            JsonValue::Array(items) => items.iter().map(decode_untyped).collect(),
            other => vec![decode_untyped(other)],
        });
    }

    let JsonValue::Array(items) = json else {
        return Err(Error::malformed_record(
            schema.name(),
            format!("expected a JSON array, got {json}"),
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match schema.column(i) {
            Some(_) if null_token.is_null_json(item) => Ok(Value::Null),
            Some(column) => decode_value(item, column),
            None => Ok(decode_untyped(item)),
        })
        .collect()
}

/// Decode a single JSON value for a column
pub fn decode_value(json: &JsonValue, column: &Column) -> Result<Value> {
    if json.is_null() {
        return Ok(Value::Null);
    }

    let invalid = |message: String| Error::invalid_record(column.name(), message);

    match column.column_type() {
        ColumnType::Bit => match json {
            JsonValue::Bool(b) => Ok(Value::Bit(*b)),
            JsonValue::Number(n) if n.as_i64() == Some(0) => Ok(Value::Bit(false)),
            JsonValue::Number(n) if n.as_i64() == Some(1) => Ok(Value::Bit(true)),
            JsonValue::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(Value::Bit(true)),
                "false" | "0" => Ok(Value::Bit(false)),
                _ => Err(invalid(format!("'{s}' is not a bit"))),
            },
            other => Err(invalid(format!("{other} is not a bit"))),
        },
        ColumnType::FixedPoint => match json {
            JsonValue::Number(n) => n
                .as_i64()
                .map(Value::Integer)
                .ok_or_else(|| invalid(format!("{n} is not an integer"))),
            JsonValue::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| invalid(format!("'{s}': {e}"))),
            other => Err(invalid(format!("{other} is not an integer"))),
        },
        ColumnType::FloatingPoint => match json {
            JsonValue::Number(n) => n
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| invalid(format!("{n} is not a float"))),
            JsonValue::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| invalid(format!("'{s}': {e}"))),
            other => Err(invalid(format!("{other} is not a float"))),
        },
        ColumnType::Decimal => match json {
            JsonValue::Number(n) => Ok(Value::Decimal(n.to_string())),
            JsonValue::String(s) => Ok(Value::Decimal(s.clone())),
            other => Err(invalid(format!("{other} is not a decimal"))),
        },
        ColumnType::Text | ColumnType::Enum => match json {
            JsonValue::String(s) => Ok(Value::Text(s.clone())),
            other => Err(invalid(format!("{other} is not text"))),
        },
        ColumnType::Binary => match json {
            JsonValue::String(s) => BASE64
                .decode(s)
                .map(Value::Binary)
                .map_err(|e| invalid(format!("invalid base64: {e}"))),
            other => Err(invalid(format!("{other} is not base64 text"))),
        },
        ColumnType::Date => {
            let s = expect_str(json, column)?;
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map(Value::Date)
                .map_err(|e| invalid(format!("'{s}': {e}")))
        }
        ColumnType::DateTime => {
            let s = expect_str(json, column)?;
            parse_date_time(s)
                .map(Value::DateTime)
                .ok_or_else(|| invalid(format!("'{s}' is not a date-time")))
        }
        ColumnType::Time => {
            let s = expect_str(json, column)?;
            NaiveTime::parse_from_str(s, TIME_FORMAT)
                .map(Value::Time)
                .map_err(|e| invalid(format!("'{s}': {e}")))
        }
        ColumnType::Array | ColumnType::Set => match json {
            JsonValue::Array(items) => Ok(Value::Array(items.iter().map(decode_untyped).collect())),
            other => Err(invalid(format!("{other} is not an array"))),
        },
        ColumnType::Map => match json {
            JsonValue::Object(_) => Ok(decode_untyped(json)),
            other => Err(invalid(format!("{other} is not an object"))),
        },
        ColumnType::Unknown => Ok(decode_untyped(json)),
    }
}

/// Decode a JSON value without type information
pub fn decode_untyped(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bit(*b),
        JsonValue::Number(n) => n
            .as_i64()
            .map_or_else(|| Value::Float(n.as_f64().unwrap_or(f64::NAN)), Value::Integer),
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(items) => Value::Array(items.iter().map(decode_untyped).collect()),
        JsonValue::Object(obj) => Value::Map(
            obj.iter()
                .map(|(k, v)| (k.clone(), decode_untyped(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}

/// Encode a record as a JSON array
pub fn encode_record(record: &[Value]) -> JsonValue {
    JsonValue::Array(record.iter().map(encode_value).collect())
}

/// Encode a single value as JSON
pub fn encode_value(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bit(b) => JsonValue::Bool(*b),
        Value::Integer(i) => JsonValue::from(*i),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map_or_else(|| JsonValue::String(f.to_string()), JsonValue::Number),
        Value::Decimal(s) | Value::Text(s) => JsonValue::String(s.clone()),
        Value::Binary(bytes) => JsonValue::String(BASE64.encode(bytes)),
        Value::Date(d) => JsonValue::String(d.format(DATE_FORMAT).to_string()),
        Value::DateTime(dt) => JsonValue::String(dt.format(DATE_TIME_FORMAT).to_string()),
        Value::Time(t) => JsonValue::String(t.format(TIME_FORMAT).to_string()),
        Value::Array(items) => encode_record(items),
        Value::Map(map) => JsonValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), encode_value(v)))
                .collect(),
        ),
    }
}

fn expect_str<'a>(json: &'a JsonValue, column: &Column) -> Result<&'a str> {
    json.as_str()
        .ok_or_else(|| Error::invalid_record(column.name(), format!("{json} is not text")))
}

/// Accepts `T`/space separated local date-times and RFC 3339 (converted to UTC)
fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc()))
}

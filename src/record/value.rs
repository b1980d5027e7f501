//! Record value types

use crate::types::JsonValue;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

/// Positional record: one value per column of its schema
///
/// Records of an empty schema have a producer-defined length.
pub type Record = Vec<Value>;

/// A single field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Canonical null marker
    Null,
    Bit(bool),
    Integer(i64),
    Float(f64),
    /// Decimal kept in its textual form to avoid precision loss
    Decimal(String),
    Text(String),
    Binary(Vec<u8>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Check if this is the canonical null marker
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text of a `Text` value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bit(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Binary(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// How the source side represents null
///
/// `Value::Null` is always null. A source may additionally encode null as a
/// text token (the text transfer format uses `NULL`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NullToken(Option<String>);

impl NullToken {
    /// Only `Value::Null` is null
    pub fn none() -> Self {
        Self(None)
    }

    /// Treat text equal to `token` as null too
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// The configured token, if any
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Check if a source value represents null
    pub fn is_null(&self, value: &Value) -> bool {
        match (value, &self.0) {
            (Value::Null, _) => true,
            (Value::Text(text), Some(token)) => text == token,
            _ => false,
        }
    }

    /// Check if a raw JSON value represents null
    pub fn is_null_json(&self, json: &JsonValue) -> bool {
        match (json, &self.0) {
            (JsonValue::Null, _) => true,
            (JsonValue::String(text), Some(token)) => text == token,
            _ => false,
        }
    }

    /// Map the source null representation to the canonical null marker
    pub fn normalize(&self, value: Value) -> Value {
        if self.is_null(&value) {
            Value::Null
        } else {
            value
        }
    }
}

impl From<Option<String>> for NullToken {
    fn from(token: Option<String>) -> Self {
        Self(token)
    }
}

//! Records to Arrow conversion
//!
//! Builds Arrow RecordBatches from destination records using the
//! destination schema's column types.

use crate::error::{Error, Result};
use crate::record::{encode_record, encode_value, Record, Value};
use crate::schema::{Column, ColumnType, Schema};
use crate::types::JsonValue;
use arrow::array::{
    ArrayRef, BinaryArray, BooleanArray, Date32Array, Float64Array, Int64Array, StringArray,
    Time64MicrosecondArray, TimestampMicrosecondArray,
};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, Timelike};
use std::sync::Arc;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

static NULL: Value = Value::Null;

/// Convert destination records to an Arrow RecordBatch
///
/// Records of an empty schema are stored as JSON text in a single column.
pub fn records_to_batch(records: &[Record], schema: &Schema) -> Result<RecordBatch> {
    let arrow_schema = Arc::new(schema.to_arrow());

    let columns: Vec<ArrayRef> = if schema.is_empty() {
        let arr: StringArray = records
            .iter()
            .map(|r| Some(encode_record(r).to_string()))
            .collect();
        vec![Arc::new(arr)]
    } else {
        schema
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let values: Vec<&Value> = records
                    .iter()
                    .map(|r| r.get(i).unwrap_or(&NULL))
                    .collect();
                build_array(&values, column)
            })
            .collect::<Result<_>>()?
    };

    RecordBatch::try_new(arrow_schema, columns).map_err(|e| Error::Output {
        message: format!("Failed to create RecordBatch for '{}': {e}", schema.name()),
    })
}

/// Build an Arrow array for one column
fn build_array(values: &[&Value], column: &Column) -> Result<ArrayRef> {
    let mismatch = |value: &Value| {
        Error::invalid_record(
            column.name(),
            format!("cannot store {value:?} as {}", column.column_type()),
        )
    };

    match column.column_type() {
        ColumnType::Bit => {
            let items = collect(values, |v| match v {
                Value::Bit(b) => Ok(*b),
                other => Err(mismatch(other)),
            })?;
            Ok(Arc::new(BooleanArray::from(items)))
        }

        ColumnType::FixedPoint => {
            let items = collect(values, |v| match v {
                Value::Integer(i) => Ok(*i),
                other => Err(mismatch(other)),
            })?;
            Ok(Arc::new(Int64Array::from(items)))
        }

        ColumnType::FloatingPoint => {
            #[allow(clippy::cast_precision_loss)]
            let items = collect(values, |v| match v {
                Value::Float(f) => Ok(*f),
                Value::Integer(i) => Ok(*i as f64),
                other => Err(mismatch(other)),
            })?;
            Ok(Arc::new(Float64Array::from(items)))
        }

        ColumnType::Binary => {
            let items = collect(values, |v| match v {
                Value::Binary(b) => Ok(b.as_slice()),
                Value::Text(s) => Ok(s.as_bytes()),
                other => Err(mismatch(other)),
            })?;
            Ok(Arc::new(BinaryArray::from(items)))
        }

        ColumnType::Date => {
            let items = collect(values, |v| match v {
                Value::Date(d) => Ok(d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE),
                other => Err(mismatch(other)),
            })?;
            Ok(Arc::new(Date32Array::from(items)))
        }

        ColumnType::DateTime => {
            let items = collect(values, |v| match v {
                Value::DateTime(dt) => Ok(dt.and_utc().timestamp_micros()),
                other => Err(mismatch(other)),
            })?;
            Ok(Arc::new(TimestampMicrosecondArray::from(items)))
        }

        ColumnType::Time => {
            let items = collect(values, |v| match v {
                Value::Time(t) => Ok(i64::from(t.num_seconds_from_midnight()) * 1_000_000
                    + i64::from(t.nanosecond() / 1_000)),
                other => Err(mismatch(other)),
            })?;
            Ok(Arc::new(Time64MicrosecondArray::from(items)))
        }

        ColumnType::Text
        | ColumnType::Enum
        | ColumnType::Decimal
        | ColumnType::Array
        | ColumnType::Set
        | ColumnType::Map
        | ColumnType::Unknown => {
            let items = collect(values, |v| {
                Ok(match encode_value(v) {
                    JsonValue::String(s) => s,
                    other => other.to_string(),
                })
            })?;
            Ok(Arc::new(StringArray::from(items)))
        }
    }
}

/// Map non-null values, keeping nulls as `None`
fn collect<'a, T>(
    values: &[&'a Value],
    f: impl Fn(&'a Value) -> Result<T>,
) -> Result<Vec<Option<T>>> {
    values
        .iter()
        .map(|&v| if v.is_null() { Ok(None) } else { f(v).map(Some) })
        .collect()
}

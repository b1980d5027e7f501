//! Record module
//!
//! Positional records and their values.
//!
//! # Overview
//!
//! - `Value` - typed field value with an explicit `Null` marker
//! - `Record` - positional sequence of values
//! - `NullToken` - how the source side represents null
//! - JSON codec used by the line-oriented sources and sinks

mod json;
mod value;

pub use json::{
    decode_record, decode_record_with, decode_untyped, decode_value, encode_record, encode_value,
};
pub use value::{NullToken, Record, Value};

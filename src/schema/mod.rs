//! Schema module
//!
//! Column and schema model shared by both sides of a transfer.
//!
//! # Features
//!
//! - **Closed column type set**: fixed point, floating point, text, binary, date/time, ...
//! - **Nullable by default**: a column accepts null unless marked `nullable: false`
//! - **Frozen schemas**: append-only builder, validated once
//! - **Arrow mapping**: destination schemas drive Parquet output

mod convert;
mod types;

pub use convert::{arrow_data_type, OPAQUE_RECORD_COLUMN};
pub use types::{Column, ColumnType, Schema, SchemaBuilder, SchemaDefinition};

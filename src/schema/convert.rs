//! Arrow schema conversion

use super::types::{ColumnType, Schema};
use arrow::datatypes::{DataType, Field, Schema as ArrowSchema, TimeUnit};

/// Column name used for opaque records when the schema is empty
pub const OPAQUE_RECORD_COLUMN: &str = "record";

/// Arrow type used to store values of a column type
///
/// Collection types and decimals are stored as text (JSON for collections).
pub fn arrow_data_type(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::Bit => DataType::Boolean,
        ColumnType::FixedPoint => DataType::Int64,
        ColumnType::FloatingPoint => DataType::Float64,
        ColumnType::Binary => DataType::Binary,
        ColumnType::Date => DataType::Date32,
        ColumnType::DateTime => DataType::Timestamp(TimeUnit::Microsecond, None),
        ColumnType::Time => DataType::Time64(TimeUnit::Microsecond),
        ColumnType::Text
        | ColumnType::Enum
        | ColumnType::Decimal
        | ColumnType::Array
        | ColumnType::Set
        | ColumnType::Map
        | ColumnType::Unknown => DataType::Utf8,
    }
}

impl Schema {
    /// Convert to an Arrow schema
    ///
    /// An empty schema maps to a single nullable text column holding each
    /// record as JSON.
    pub fn to_arrow(&self) -> ArrowSchema {
        if self.is_empty() {
            return ArrowSchema::new(vec![Field::new(
                OPAQUE_RECORD_COLUMN,
                DataType::Utf8,
                true,
            )]);
        }

        let fields: Vec<Field> = self
            .columns()
            .iter()
            .map(|c| Field::new(c.name(), arrow_data_type(c.column_type()), c.is_nullable()))
            .collect();

        ArrowSchema::new(fields)
    }
}

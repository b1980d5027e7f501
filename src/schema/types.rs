//! Schema types
//!
//! A [`Schema`] is a named, ordered list of [`Column`]s. Column order is the
//! positional contract for every record associated with the schema.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Column Type
// ============================================================================

/// Semantic kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Array,
    Binary,
    Bit,
    Date,
    DateTime,
    Decimal,
    Enum,
    FixedPoint,
    FloatingPoint,
    Map,
    Set,
    Text,
    Time,
    #[default]
    Unknown,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColumnType::Array => "array",
            ColumnType::Binary => "binary",
            ColumnType::Bit => "bit",
            ColumnType::Date => "date",
            ColumnType::DateTime => "date_time",
            ColumnType::Decimal => "decimal",
            ColumnType::Enum => "enum",
            ColumnType::FixedPoint => "fixed_point",
            ColumnType::FloatingPoint => "floating_point",
            ColumnType::Map => "map",
            ColumnType::Set => "set",
            ColumnType::Text => "text",
            ColumnType::Time => "time",
            ColumnType::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// Column
// ============================================================================

/// A named, typed field descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    #[serde(rename = "type", default)]
    column_type: ColumnType,
    /// Absent means nullable
    #[serde(default = "default_nullable")]
    nullable: bool,
}

fn default_nullable() -> bool {
    true
}

impl Column {
    /// Create a nullable column
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: true,
        }
    }

    /// Create a column that rejects null
    pub fn not_null(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
        }
    }

    /// Shorthand for a nullable `fixed_point` column
    pub fn fixed_point(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::FixedPoint)
    }

    /// Shorthand for a nullable `floating_point` column
    pub fn floating_point(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::FloatingPoint)
    }

    /// Shorthand for a nullable `text` column
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.column_type)?;
        if !self.nullable {
            write!(f, " not null")?;
        }
        Ok(())
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Named, ordered, frozen collection of columns
///
/// A schema with zero columns is valid and means the record shape is unknown
/// and not enforced. Use [`Schema::builder`] to construct one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemaDefinition", into = "SchemaDefinition")]
pub struct Schema {
    name: String,
    columns: Vec<Column>,
}

impl Schema {
    /// Start building a schema
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// A schema without columns
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Diagnostic label, never used for matching
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in positional order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True iff the schema has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column at a position
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Column by name
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Position of a column by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {{", self.name)?;
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{column}")?;
        }
        write!(f, "}}")
    }
}

/// Append-only builder for [`Schema`]
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    columns: Vec<Column>,
}

impl SchemaBuilder {
    /// Append a column
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Append several columns
    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Validate and freeze the schema
    pub fn build(self) -> Result<Schema> {
        let mut seen = HashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if column.name.is_empty() {
                return Err(Error::invalid_schema(&self.name, "column name cannot be empty"));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(Error::invalid_schema(
                    &self.name,
                    format!("duplicate column '{}'", column.name),
                ));
            }
        }

        Ok(Schema {
            name: self.name,
            columns: self.columns,
        })
    }
}

/// Serialized form of a schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Schema name
    pub name: String,
    /// Column definitions in positional order
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl TryFrom<SchemaDefinition> for Schema {
    type Error = Error;

    fn try_from(def: SchemaDefinition) -> Result<Self> {
        if def.name.is_empty() {
            return Err(Error::config("Schema name cannot be empty"));
        }
        Schema::builder(def.name).columns(def.columns).build()
    }
}

impl From<Schema> for SchemaDefinition {
    fn from(schema: Schema) -> Self {
        Self {
            name: schema.name,
            columns: schema.columns,
        }
    }
}

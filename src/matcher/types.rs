//! Matcher types and traits
//!
//! Defines the matching contract shared by every strategy.

use crate::error::{Error, Result};
use crate::record::{Record, Value};
use crate::schema::{Column, Schema};
use serde::{Deserialize, Serialize};

/// Matching strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Match destination columns to source columns with the same name
    #[default]
    Name,
    /// Match destination columns to source columns at the same position
    Location,
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStrategy::Name => write!(f, "name"),
            MatchStrategy::Location => write!(f, "location"),
        }
    }
}

/// Reconciles records shaped by one schema into records shaped by another
///
/// A matcher is built once per (from, to) pair and never mutated, so one
/// instance can be shared across workers.
pub trait Matcher: Send + Sync {
    /// Strategy implemented by this matcher
    fn strategy(&self) -> MatchStrategy;

    /// Schema of incoming records
    fn from_schema(&self) -> &Schema;

    /// Schema of outgoing records
    fn to_schema(&self) -> &Schema;

    /// Reshape a source record into a destination record
    ///
    /// Fails with [`Error::SchemaMismatch`] when a non-nullable destination
    /// column cannot be filled.
    fn reconcile(&self, record: Record) -> Result<Record>;

    /// How each destination column will be resolved, computed from the schemas
    fn plan(&self) -> Vec<ColumnResolution>;
}

/// Write null for a destination column with no source value, or reject it
///
/// Touches exactly `out[position]`.
pub fn fill_null_for_unexpected_column(
    column: &Column,
    schema: &Schema,
    out: &mut [Value],
    position: usize,
) -> Result<()> {
    if !column.is_nullable() {
        return Err(Error::schema_mismatch(column.name(), schema.name()));
    }

    tracing::trace!(
        column = column.name(),
        schema = schema.name(),
        position,
        "filling null for unmatched column"
    );
    out[position] = Value::Null;
    Ok(())
}

// ============================================================================
// Resolution Plan
// ============================================================================

/// How one destination column gets its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// Copied from the source value at `source_position`
    Copy { source_position: usize },
    /// No source value; the column is nullable and receives null
    NullFill,
    /// No source value and the column is not nullable
    Reject,
}

/// Resolution of one destination column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnResolution {
    /// Destination position
    pub position: usize,
    /// Destination column name
    pub column: String,
    /// How the value is produced
    #[serde(flatten)]
    pub resolution: Resolution,
}

impl ColumnResolution {
    /// Resolution for a destination column that has no source value
    pub fn unmatched(position: usize, column: &Column) -> Self {
        Self {
            position,
            column: column.name().to_string(),
            resolution: if column.is_nullable() {
                Resolution::NullFill
            } else {
                Resolution::Reject
            },
        }
    }

    /// Check if this column would fail reconciliation
    pub fn is_rejected(&self) -> bool {
        self.resolution == Resolution::Reject
    }
}

impl std::fmt::Display for ColumnResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.resolution {
            Resolution::Copy { source_position } => write!(
                f,
                "[{}] {} <- source[{}]",
                self.position, self.column, source_position
            ),
            Resolution::NullFill => write!(f, "[{}] {} <- null", self.position, self.column),
            Resolution::Reject => write!(
                f,
                "[{}] {} REJECTED (not nullable, no source value)",
                self.position, self.column
            ),
        }
    }
}

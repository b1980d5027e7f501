//! Name-based matching
//!
//! Destination columns take the value of the source column with the same
//! name. Destination columns absent from the source are null-filled when
//! nullable and rejected otherwise. Source columns absent from the
//! destination are dropped.

use super::types::{
    fill_null_for_unexpected_column, ColumnResolution, MatchStrategy, Matcher, Resolution,
};
use crate::error::Result;
use crate::record::{NullToken, Record, Value};
use crate::schema::Schema;
use std::collections::HashMap;

/// Matches columns by name
#[derive(Debug, Clone)]
pub struct NameMatcher {
    from: Schema,
    to: Schema,
    null_token: NullToken,
    /// Source column name -> source position, built once
    from_index: HashMap<String, usize>,
}

impl NameMatcher {
    /// Create a matcher where only `Value::Null` is null on the source side
    pub fn new(from: Schema, to: Schema) -> Self {
        Self::with_null_token(from, to, NullToken::none())
    }

    /// Create a matcher with a source null token
    pub fn with_null_token(from: Schema, to: Schema, null_token: NullToken) -> Self {
        let from_index = from
            .columns()
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name().to_string(), i))
            .collect();

        Self {
            from,
            to,
            null_token,
            from_index,
        }
    }

    /// Source position of a column name, if present
    pub fn source_position(&self, name: &str) -> Option<usize> {
        self.from_index.get(name).copied()
    }
}

impl Matcher for NameMatcher {
    fn strategy(&self) -> MatchStrategy {
        MatchStrategy::Name
    }

    fn from_schema(&self) -> &Schema {
        &self.from
    }

    fn to_schema(&self) -> &Schema {
        &self.to
    }

    fn reconcile(&self, mut record: Record) -> Result<Record> {
        // No destination shape to enforce
        if self.to.is_empty() {
            return Ok(record);
        }

        let mut out = vec![Value::Null; self.to.len()];

        for (i, column) in self.to.columns().iter().enumerate() {
            // The schema may be looser than the record, check bounds
            match self.source_position(column.name()) {
                Some(from_pos) if from_pos < record.len() => {
                    let value = std::mem::replace(&mut record[from_pos], Value::Null);
                    out[i] = self.null_token.normalize(value);
                }
                _ => fill_null_for_unexpected_column(column, &self.to, &mut out, i)?,
            }
        }

        Ok(out)
    }

    fn plan(&self) -> Vec<ColumnResolution> {
        self.to
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| match self.source_position(column.name()) {
                Some(source_position) => ColumnResolution {
                    position: i,
                    column: column.name().to_string(),
                    resolution: Resolution::Copy { source_position },
                },
                None => ColumnResolution::unmatched(i, column),
            })
            .collect()
    }
}

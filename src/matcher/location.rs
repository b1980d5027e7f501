//! Position-based matching

use super::types::{
    fill_null_for_unexpected_column, ColumnResolution, MatchStrategy, Matcher, Resolution,
};
use crate::error::Result;
use crate::record::{NullToken, Record, Value};
use crate::schema::Schema;

/// Matches destination position `i` to source position `i`
///
/// Only positions declared by the source schema are matched, so an empty
/// source schema matches nothing. Trailing destination columns without a
/// source value follow the same null-fill-or-reject rule as name matching.
/// Extra source values are dropped.
#[derive(Debug, Clone)]
pub struct LocationMatcher {
    from: Schema,
    to: Schema,
    null_token: NullToken,
}

impl LocationMatcher {
    pub fn new(from: Schema, to: Schema) -> Self {
        Self::with_null_token(from, to, NullToken::none())
    }

    pub fn with_null_token(from: Schema, to: Schema, null_token: NullToken) -> Self {
        Self {
            from,
            to,
            null_token,
        }
    }
}

impl Matcher for LocationMatcher {
    fn strategy(&self) -> MatchStrategy {
        MatchStrategy::Location
    }

    fn from_schema(&self) -> &Schema {
        &self.from
    }

    fn to_schema(&self) -> &Schema {
        &self.to
    }

    fn reconcile(&self, record: Record) -> Result<Record> {
        if self.to.is_empty() {
            return Ok(record);
        }

        let mut out = vec![Value::Null; self.to.len()];
        let mut values = record.into_iter().take(self.from.len());

        for (i, column) in self.to.columns().iter().enumerate() {
            match values.next() {
                Some(value) => out[i] = self.null_token.normalize(value),
                None => fill_null_for_unexpected_column(column, &self.to, &mut out, i)?,
            }
        }

        Ok(out)
    }

    fn plan(&self) -> Vec<ColumnResolution> {
        self.to
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| {
                if i < self.from.len() {
                    ColumnResolution {
                        position: i,
                        column: column.name().to_string(),
                        resolution: Resolution::Copy { source_position: i },
                    }
                } else {
                    ColumnResolution::unmatched(i, column)
                }
            })
            .collect()
    }
}

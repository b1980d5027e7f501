//! Plan report rendering

use crate::matcher::{ColumnResolution, MatchStrategy, Matcher, Resolution};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Write as _;

/// Column resolution report for a transfer
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub transfer: String,
    pub strategy: MatchStrategy,
    pub from: String,
    pub to: String,
    /// Destination schema is empty, records flow through unchanged
    pub pass_through: bool,
    pub columns: Vec<ColumnResolution>,
    /// Source columns no destination column reads
    pub dropped: Vec<String>,
}

impl PlanReport {
    pub fn build(transfer: &str, matcher: &dyn Matcher) -> Self {
        let columns = matcher.plan();
        let used: HashSet<usize> = columns
            .iter()
            .filter_map(|c| match c.resolution {
                Resolution::Copy { source_position } => Some(source_position),
                _ => None,
            })
            .collect();

        let pass_through = matcher.to_schema().is_empty();
        let dropped = if pass_through {
            Vec::new()
        } else {
            matcher
                .from_schema()
                .columns()
                .iter()
                .enumerate()
                .filter(|(i, _)| !used.contains(i))
                .map(|(_, c)| c.name().to_string())
                .collect()
        };

        Self {
            transfer: transfer.to_string(),
            strategy: matcher.strategy(),
            from: matcher.from_schema().name().to_string(),
            to: matcher.to_schema().name().to_string(),
            pass_through,
            columns,
            dropped,
        }
    }

    /// First destination column that would fail reconciliation
    pub fn first_rejected(&self) -> Option<&ColumnResolution> {
        self.columns.iter().find(|c| c.is_rejected())
    }

    /// Human-readable rendering
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: {} -> {} (match by {})",
            self.transfer, self.from, self.to, self.strategy
        );

        if self.pass_through {
            let _ = writeln!(out, "  destination schema is empty, records pass through unchanged");
            return out;
        }

        for column in &self.columns {
            let _ = writeln!(out, "  {column}");
        }
        if !self.dropped.is_empty() {
            let _ = writeln!(out, "  dropped: {}", self.dropped.join(", "));
        }
        out
    }
}

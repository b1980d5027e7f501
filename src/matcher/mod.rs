//! Matcher module
//!
//! Reconciles source records against the destination schema.
//!
//! # Overview
//!
//! - `Matcher` - the reconciliation contract, one instance per schema pair
//! - `NameMatcher` - matches columns by name (the default)
//! - `LocationMatcher` - matches columns by position
//! - `select_matcher` - picks and builds the strategy for a transfer
//!
//! When the destination schema is empty every strategy passes records
//! through unchanged. A destination column with no source value receives
//! null when nullable; otherwise reconciliation fails with
//! [`Error::SchemaMismatch`](crate::Error::SchemaMismatch).

mod factory;
mod location;
mod name;
mod types;

pub use factory::{select_matcher, select_matcher_with, MatcherConfig};
pub use location::LocationMatcher;
pub use name::NameMatcher;
pub use types::{
    fill_null_for_unexpected_column, ColumnResolution, MatchStrategy, Matcher, Resolution,
};

#[cfg(test)]
mod tests;

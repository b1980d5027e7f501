//! Matcher selection

use super::location::LocationMatcher;
use super::name::NameMatcher;
use super::types::{MatchStrategy, Matcher};
use crate::record::NullToken;
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Matching configuration for a transfer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MatcherConfig {
    /// Strategy to use
    #[serde(default)]
    pub strategy: MatchStrategy,
    /// Text the source uses to represent null
    #[serde(default)]
    pub null_token: Option<String>,
}

impl MatcherConfig {
    /// Create a config for a strategy
    pub fn new(strategy: MatchStrategy) -> Self {
        Self {
            strategy,
            null_token: None,
        }
    }

    /// Set the source null token
    #[must_use]
    pub fn with_null_token(mut self, token: impl Into<String>) -> Self {
        self.null_token = Some(token.into());
        self
    }
}

/// Select the matcher for a schema pair
///
/// Always name matching; this is the entry point used at transfer setup.
pub fn select_matcher(from: Schema, to: Schema) -> Box<dyn Matcher> {
    select_matcher_with(from, to, &MatcherConfig::default())
}

/// Select the matcher for a schema pair using an explicit configuration
pub fn select_matcher_with(from: Schema, to: Schema, config: &MatcherConfig) -> Box<dyn Matcher> {
    debug!(
        strategy = %config.strategy,
        from = from.name(),
        from_columns = from.len(),
        to = to.name(),
        to_columns = to.len(),
        "selecting matcher"
    );

    let null_token = NullToken::from(config.null_token.clone());
    match config.strategy {
        MatchStrategy::Name => Box::new(NameMatcher::with_null_token(from, to, null_token)),
        MatchStrategy::Location => Box::new(LocationMatcher::with_null_token(from, to, null_token)),
    }
}

//! Transfer and schema definitions
//!
//! Schemas and transfers are declared in YAML (or JSON):
//!
//! ```yaml
//! name: users-copy
//! from:
//!   name: pg.users
//!   columns:
//!     - { name: id, type: fixed_point, nullable: false }
//!     - { name: email, type: text }
//! to:
//!   name: warehouse.users
//!   columns:
//!     - { name: id, type: fixed_point, nullable: false }
//!     - { name: email, type: text }
//!     - { name: country, type: text }
//! matching:
//!   strategy: name
//!   null_token: "NULL"
//! batch_size: 500
//! ```

use crate::error::{Error, Result};
use crate::matcher::{select_matcher_with, Matcher, MatcherConfig};
use crate::schema::Schema;
use crate::types::Direction;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// Transfer Config
// ============================================================================

/// Complete transfer definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Transfer name (diagnostic)
    #[serde(default = "default_name")]
    pub name: String,

    /// Schema of extracted records
    pub from: Schema,

    /// Schema expected by the destination
    pub to: Schema,

    /// Matching settings
    #[serde(default)]
    pub matching: MatcherConfig,

    /// Records reconciled per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Workers reconciling one batch in parallel
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_name() -> String {
    "transfer".to_string()
}

fn default_batch_size() -> usize {
    1000
}

fn default_concurrency() -> usize {
    1
}

impl TransferConfig {
    /// Create a config with default settings
    pub fn new(name: impl Into<String>, from: Schema, to: Schema) -> Self {
        Self {
            name: name.into(),
            from,
            to,
            matching: MatcherConfig::default(),
            batch_size: default_batch_size(),
            concurrency: default_concurrency(),
        }
    }

    /// Set the matching settings
    #[must_use]
    pub fn with_matching(mut self, matching: MatcherConfig) -> Self {
        self.matching = matching;
        self
    }

    /// Schema for one side of the transfer
    pub fn schema(&self, direction: Direction) -> &Schema {
        match direction {
            Direction::From => &self.from,
            Direction::To => &self.to,
        }
    }

    /// Build the matcher for this transfer
    pub fn matcher(&self) -> Box<dyn Matcher> {
        select_matcher_with(self.from.clone(), self.to.clone(), &self.matching)
    }

    /// Validate settings not covered by schema construction
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::config("Transfer name cannot be empty"));
        }
        if self.batch_size == 0 {
            return Err(Error::config(format!(
                "Transfer '{}' batch_size must be at least 1",
                self.name
            )));
        }
        if self.concurrency == 0 {
            return Err(Error::config(format!(
                "Transfer '{}' concurrency must be at least 1",
                self.name
            )));
        }
        if self.matching.null_token.as_deref() == Some("") {
            return Err(Error::config(format!(
                "Transfer '{}' null_token cannot be empty",
                self.name
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Serialization format of a definition file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// `.json` files are JSON, everything else is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(self, content: &str) -> Result<T> {
        Ok(match self {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        })
    }
}

/// Load a schema definition file
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let content = read_definition(path, "schema")?;
    load_schema_from_str(&content, ConfigFormat::from_path(path))
}

/// Load a schema definition from a string
pub fn load_schema_from_str(content: &str, format: ConfigFormat) -> Result<Schema> {
    format.parse(content)
}

/// Load a transfer definition file
pub fn load_transfer(path: impl AsRef<Path>) -> Result<TransferConfig> {
    let path = path.as_ref();
    let content = read_definition(path, "transfer")?;
    load_transfer_from_str(&content, ConfigFormat::from_path(path))
}

/// Load a transfer definition from a string
pub fn load_transfer_from_str(content: &str, format: ConfigFormat) -> Result<TransferConfig> {
    let config: TransferConfig = format.parse(content)?;
    config.validate()?;
    Ok(config)
}

fn read_definition(path: &Path, kind: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read {kind} file '{}': {e}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchStrategy;
    use crate::record::Value;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const TRANSFER_YAML: &str = r#"
name: users-copy
from:
  name: pg.users
  columns:
    - { name: id, type: fixed_point, nullable: false }
    - { name: email, type: text }
to:
  name: warehouse.users
  columns:
    - { name: email, type: text }
    - { name: id, type: fixed_point, nullable: false }
    - { name: country, type: text }
matching:
  null_token: "NULL"
batch_size: 2
"#;

    #[test]
    fn test_load_transfer_from_yaml() {
        let config = load_transfer_from_str(TRANSFER_YAML, ConfigFormat::Yaml).unwrap();

        assert_eq!(config.name, "users-copy");
        assert_eq!(config.from.len(), 2);
        assert_eq!(config.to.len(), 3);
        assert_eq!(config.schema(Direction::To).name(), "warehouse.users");
        assert_eq!(config.matching.strategy, MatchStrategy::Name);
        assert_eq!(config.batch_size, 2);
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn test_transfer_matcher() {
        let config = load_transfer_from_str(TRANSFER_YAML, ConfigFormat::Yaml).unwrap();
        let matcher = config.matcher();

        let out = matcher
            .reconcile(vec![Value::Integer(7), Value::from("NULL")])
            .unwrap();
        assert_eq!(out, vec![Value::Null, Value::Integer(7), Value::Null]);
    }

    #[test]
    fn test_transfer_defaults_and_empty_schemas() {
        let config = load_transfer_from_str(
            "from: { name: FROM-EMPTY }\nto: { name: TO-EMPTY }",
            ConfigFormat::Yaml,
        )
        .unwrap();

        assert_eq!(config.name, "transfer");
        assert!(config.from.is_empty());
        assert!(config.to.is_empty());
        assert_eq!(config.batch_size, 1000);
    }

    #[test]
    fn test_transfer_rejects_zero_batch_size() {
        let err = load_transfer_from_str(
            "from: { name: a }\nto: { name: b }\nbatch_size: 0",
            ConfigFormat::Yaml,
        )
        .unwrap_err();
        assert!(err.to_string().contains("batch_size"));
    }

    #[test]
    fn test_transfer_rejects_duplicate_columns() {
        let yaml = r"
from:
  name: a
  columns: [{ name: x, type: text }, { name: x, type: text }]
to: { name: b }
";
        assert!(load_transfer_from_str(yaml, ConfigFormat::Yaml).is_err());
    }

    #[test]
    fn test_transfer_rejects_unknown_strategy() {
        let yaml = "from: { name: a }\nto: { name: b }\nmatching: { strategy: fuzzy }";
        assert!(load_transfer_from_str(yaml, ConfigFormat::Yaml).is_err());
    }

    #[test]
    fn test_load_schema_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"name": "s", "columns": [{{"name": "a", "type": "bit", "nullable": false}}]}}"#
        )
        .unwrap();

        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema.name(), "s");
        assert!(!schema.columns()[0].is_nullable());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_schema("/nonexistent/schema.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read schema file"));
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a.JSON")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a.yml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a")), ConfigFormat::Yaml);
    }
}

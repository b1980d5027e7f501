//! Error types for Solidafy Transfer
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for Solidafy Transfer
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Matching Errors
    // ============================================================================
    /// A destination column cannot be filled from the source and does not accept null
    #[error("Schema mismatch: column '{column}' of schema '{schema}' has no matching source value and is not nullable")]
    SchemaMismatch { column: String, schema: String },

    // ============================================================================
    // Schema & Record Errors
    // ============================================================================
    #[error("Invalid schema '{schema}': {message}")]
    InvalidSchema { schema: String, message: String },

    #[error("Invalid value for column '{column}': {message}")]
    InvalidRecord { column: String, message: String },

    #[error("Malformed record for schema '{schema}': {message}")]
    MalformedRecord { schema: String, message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Arrow/Parquet Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a schema mismatch error
    pub fn schema_mismatch(column: impl Into<String>, schema: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            column: column.into(),
            schema: schema.into(),
        }
    }

    /// Create an invalid schema error
    pub fn invalid_schema(schema: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            schema: schema.into(),
            message: message.into(),
        }
    }

    /// Create an invalid record error
    pub fn invalid_record(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a malformed record error (the record as a whole cannot be read)
    pub fn malformed_record(schema: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            schema: schema.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Check if this error is a schema mismatch raised while matching
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Error::SchemaMismatch { .. })
    }
}

/// Result type alias for Solidafy Transfer
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

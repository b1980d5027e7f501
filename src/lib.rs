// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Solidafy Transfer
//!
//! Schema-driven record reconciliation for moving tabular data between a
//! source store and a destination store whose column layouts differ.
//!
//! ## Features
//!
//! - **Name Matching**: Destination columns take the same-named source value
//! - **Null Fill**: Nullable destination columns without a source value get null
//! - **Strict Mismatch**: Non-nullable columns without a source value fail the transfer
//! - **Schema-less Bypass**: An empty destination schema passes records through unchanged
//! - **Parquet Output**: Destination schemas map onto Arrow for Parquet files
//!
//! ## Quick Start
//!
//! ```rust
//! use solidafy_transfer::matcher::select_matcher;
//! use solidafy_transfer::record::Value;
//! use solidafy_transfer::schema::{Column, Schema};
//!
//! let from = Schema::builder("FROM")
//!     .column(Column::fixed_point("a"))
//!     .column(Column::floating_point("b"))
//!     .build()?;
//! let to = Schema::builder("TO")
//!     .column(Column::fixed_point("a"))
//!     .column(Column::floating_point("b"))
//!     .column(Column::text("c"))
//!     .build()?;
//!
//! let matcher = select_matcher(from, to);
//! let out = matcher.reconcile(vec![Value::Integer(1), Value::Float(2.0)])?;
//! assert_eq!(out, vec![Value::Integer(1), Value::Float(2.0), Value::Null]);
//! # Ok::<(), solidafy_transfer::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   Record    ┌──────────────────────┐   Record    ┌─────────────┐
//! │ RecordSource │ ──────────▶ │  Matcher (per pair)  │ ──────────▶ │ RecordSink  │
//! │  JSON Lines  │  from shape │  Name / Location     │   to shape  │ JSONL/Parquet│
//! └──────────────┘             └──────────────────────┘             └─────────────┘
//!                                   ▲            ▲
//!                            from Schema     to Schema
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Column and schema model
pub mod schema;

/// Record values and JSON codec
pub mod record;

/// Record reconciliation strategies
pub mod matcher;

/// Transfer and schema definitions
pub mod config;

/// Source → matcher → sink driver
pub mod pipeline;

/// Arrow/Parquet output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_schema, load_transfer, TransferConfig};
pub use matcher::{select_matcher, select_matcher_with, MatchStrategy, Matcher, MatcherConfig};
pub use record::{Record, Value};
pub use schema::{Column, ColumnType, Schema};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! CLI module
//!
//! Command-line interface for running transfers.
//!
//! # Commands
//!
//! - `run` - Reconcile JSON Lines records into the destination shape
//! - `plan` - Show how each destination column will be resolved
//! - `schema` - Validate and print a schema definition

mod commands;
mod report;
mod runner;

pub use commands::{Cli, Commands, RecordFormat, ReportFormat, StrategyArg, TransferArgs};
pub use report::PlanReport;
pub use runner::Runner;

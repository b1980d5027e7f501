//! Pipeline module
//!
//! Drives records from a source, through a matcher, into a sink.
//!
//! # Overview
//!
//! - `RecordSource` / `RecordSink` - seams to the extraction and writing layers
//! - `Transfer` - pulls batches, reconciles them and writes the result
//! - `VecSource` / `VecSink` - in-memory endpoints
//! - `JsonLinesSource` / `JsonLinesSink` - line-delimited JSON endpoints

mod io;
mod transfer;
mod types;

pub use io::{JsonLinesSink, JsonLinesSource, VecSink, VecSource};
pub use transfer::Transfer;
pub use types::{RecordSink, RecordSource, TransferStats};

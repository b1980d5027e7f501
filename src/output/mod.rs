//! Output module
//!
//! Handles Arrow RecordBatch creation and Parquet file writing.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Converting destination records to Arrow RecordBatches
//! - Writing Parquet files
//! - A `RecordSink` backed by a Parquet file

mod batch;
mod writer;

pub use batch::records_to_batch;
pub use writer::{ParquetCompression, ParquetSink, ParquetWriter, ParquetWriterConfig};

//! Pipeline types and traits
//!
//! Sources produce source-shaped records, sinks consume destination-shaped
//! records. Both are implemented outside the matching core.

use crate::error::Result;
use crate::record::Record;
use async_trait::async_trait;
use serde::Serialize;

/// Produces extracted records in batches
#[async_trait]
pub trait RecordSource: Send {
    /// Next batch of at most `max` records, `None` once exhausted
    ///
    /// An empty batch also ends the transfer.
    async fn next_batch(&mut self, max: usize) -> Result<Option<Vec<Record>>>;
}

/// Consumes reconciled records
#[async_trait]
pub trait RecordSink: Send {
    /// Write a batch of destination records
    async fn write(&mut self, records: &[Record]) -> Result<()>;

    /// Flush and close the sink
    async fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Statistics for one transfer run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransferStats {
    /// Records pulled from the source
    pub records_read: usize,
    /// Records handed to the sink
    pub records_written: usize,
    /// Batches written
    pub batches: usize,
    /// Wall-clock duration
    pub duration_ms: u64,
}

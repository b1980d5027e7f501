//! Transfer driver

use super::types::{RecordSink, RecordSource, TransferStats};
use crate::error::{Error, Result};
use crate::matcher::Matcher;
use crate::record::Record;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Moves records from a source to a sink through a matcher
pub struct Transfer {
    matcher: Arc<dyn Matcher>,
    batch_size: usize,
    concurrency: usize,
}

impl Transfer {
    /// Create a transfer with batch size 1000 and no parallelism
    pub fn new(matcher: Arc<dyn Matcher>) -> Self {
        Self {
            matcher,
            batch_size: 1000,
            concurrency: 1,
        }
    }

    /// Set records per batch
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set the number of workers reconciling a batch
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// The shared matcher
    pub fn matcher(&self) -> &Arc<dyn Matcher> {
        &self.matcher
    }

    /// Run until the source is exhausted
    ///
    /// The first schema mismatch aborts the run; nothing from the failing
    /// batch reaches the sink and the sink is not finished.
    pub async fn run<S, K>(&self, source: &mut S, sink: &mut K) -> Result<TransferStats>
    where
        S: RecordSource + ?Sized,
        K: RecordSink + ?Sized,
    {
        let start = Instant::now();
        let mut stats = TransferStats::default();

        info!(
            from = self.matcher.from_schema().name(),
            to = self.matcher.to_schema().name(),
            strategy = %self.matcher.strategy(),
            "Starting transfer"
        );

        while let Some(batch) = source.next_batch(self.batch_size).await? {
            if batch.is_empty() {
                debug!("Source returned an empty batch, treating it as exhausted");
                break;
            }
            stats.records_read += batch.len();

            let out = match self.reconcile_batch(batch).await {
                Ok(out) => out,
                Err(e) => {
                    warn!(
                        error = %e,
                        records_written = stats.records_written,
                        "Transfer aborted"
                    );
                    return Err(e);
                }
            };

            sink.write(&out).await?;
            stats.records_written += out.len();
            stats.batches += 1;
            debug!(batch = stats.batches, records = out.len(), "Batch written");
        }

        sink.finish().await?;
        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            records = stats.records_written,
            batches = stats.batches,
            duration_ms = stats.duration_ms,
            "Transfer complete"
        );
        Ok(stats)
    }

    /// Reconcile one batch, preserving record order
    pub async fn reconcile_batch(&self, batch: Vec<Record>) -> Result<Vec<Record>> {
        if self.concurrency <= 1 || batch.len() < 2 {
            return batch
                .into_iter()
                .map(|record| self.matcher.reconcile(record))
                .collect();
        }

        let total = batch.len();
        let chunk_size = total.div_ceil(self.concurrency);
        let mut records = batch.into_iter();
        let mut tasks = Vec::with_capacity(self.concurrency);

        loop {
            let chunk: Vec<Record> = records.by_ref().take(chunk_size).collect();
            if chunk.is_empty() {
                break;
            }
            let matcher = Arc::clone(&self.matcher);
            tasks.push(tokio::task::spawn_blocking(move || {
                chunk
                    .into_iter()
                    .map(|record| matcher.reconcile(record))
                    .collect::<Result<Vec<_>>>()
            }));
        }

        let results = futures::future::try_join_all(tasks)
            .await
            .map_err(|e| Error::Other(format!("Reconcile worker failed: {e}")))?;

        let mut out = Vec::with_capacity(total);
        for chunk in results {
            out.extend(chunk?);
        }
        Ok(out)
    }
}

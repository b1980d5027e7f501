//! Parquet output
//!
//! Writes reconciled records to a Parquet file shaped by the destination
//! schema.

use super::batch::records_to_batch;
use crate::error::{Error, Result};
use crate::pipeline::RecordSink;
use crate::record::Record;
use crate::schema::Schema;
use arrow::datatypes::Schema as ArrowSchema;
use async_trait::async_trait;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Compression codec for Parquet output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParquetCompression {
    None,
    #[default]
    Snappy,
    Gzip,
    Zstd,
}

impl From<ParquetCompression> for Compression {
    fn from(compression: ParquetCompression) -> Self {
        match compression {
            ParquetCompression::None => Compression::UNCOMPRESSED,
            ParquetCompression::Snappy => Compression::SNAPPY,
            ParquetCompression::Gzip => Compression::GZIP(GzipLevel::default()),
            ParquetCompression::Zstd => Compression::ZSTD(ZstdLevel::default()),
        }
    }
}

/// Configuration for Parquet writer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParquetWriterConfig {
    #[serde(default)]
    compression: ParquetCompression,
    #[serde(default = "default_row_group_size")]
    row_group_size: usize,
}

fn default_row_group_size() -> usize {
    1024 * 1024
}

impl Default for ParquetWriterConfig {
    fn default() -> Self {
        Self {
            compression: ParquetCompression::default(),
            row_group_size: default_row_group_size(),
        }
    }
}

impl ParquetWriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compression codec
    #[must_use]
    pub fn with_compression(mut self, compression: ParquetCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Set row group size
    #[must_use]
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size.max(1);
        self
    }

    pub fn compression(&self) -> ParquetCompression {
        self.compression
    }

    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    fn build_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression.into())
            .set_max_row_group_size(self.row_group_size)
            .build()
    }
}

/// Parquet file writer for destination records
pub struct ParquetWriter {
    writer: ArrowWriter<File>,
    schema: Schema,
    rows_written: usize,
}

impl ParquetWriter {
    /// Create the file and write the header for `schema`
    pub fn create(
        path: impl AsRef<Path>,
        schema: &Schema,
        config: &ParquetWriterConfig,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            Error::output(format!("Failed to create file '{}': {e}", path.display()))
        })?;

        let arrow_schema: Arc<ArrowSchema> = Arc::new(schema.to_arrow());
        let writer = ArrowWriter::try_new(file, arrow_schema, Some(config.build_properties()))
            .map_err(|e| Error::output(format!("Failed to create Parquet writer: {e}")))?;

        debug!(path = %path.display(), schema = schema.name(), "Opened Parquet output");
        Ok(Self {
            writer,
            schema: schema.clone(),
            rows_written: 0,
        })
    }

    /// Append records
    pub fn write_records(&mut self, records: &[Record]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let batch = records_to_batch(records, &self.schema)?;
        self.writer
            .write(&batch)
            .map_err(|e| Error::output(format!("Failed to write batch: {e}")))?;
        self.rows_written += batch.num_rows();
        Ok(())
    }

    /// Get the number of rows written so far
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Close the writer and finalize the file
    pub fn close(self) -> Result<usize> {
        let rows = self.rows_written;
        self.writer
            .close()
            .map_err(|e| Error::output(format!("Failed to close Parquet writer: {e}")))?;
        Ok(rows)
    }
}

/// Sink writing destination records to one Parquet file
///
/// The file is created on the first write or, for an empty run, on finish.
/// File I/O runs on the blocking thread pool.
pub struct ParquetSink {
    path: PathBuf,
    schema: Schema,
    config: ParquetWriterConfig,
    writer: Option<ParquetWriter>,
}

impl ParquetSink {
    pub fn new(path: impl Into<PathBuf>, schema: Schema, config: ParquetWriterConfig) -> Self {
        Self {
            path: path.into(),
            schema,
            config,
            writer: None,
        }
    }

    /// Run `f` on the blocking pool with the open writer (created if needed)
    async fn with_writer<T, F>(&mut self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(ParquetWriter) -> Result<T> + Send + 'static,
    {
        let writer = self.writer.take();
        let path = self.path.clone();
        let schema = self.schema.clone();
        let config = self.config.clone();

        tokio::task::spawn_blocking(move || {
            let writer = match writer {
                Some(writer) => writer,
                None => ParquetWriter::create(&path, &schema, &config)?,
            };
            f(writer)
        })
        .await
        .map_err(|e| Error::output(format!("Parquet writer task failed: {e}")))?
    }
}

#[async_trait]
impl RecordSink for ParquetSink {
    async fn write(&mut self, records: &[Record]) -> Result<()> {
        let records = records.to_vec();
        let writer = self
            .with_writer(move |mut writer| {
                writer.write_records(&records)?;
                Ok(writer)
            })
            .await?;
        self.writer = Some(writer);
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        let rows = self.with_writer(ParquetWriter::close).await?;
        debug!(path = %self.path.display(), rows, "Closed Parquet output");
        Ok(())
    }
}

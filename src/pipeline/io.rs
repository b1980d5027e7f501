//! Built-in sources and sinks

use super::types::{RecordSink, RecordSource};
use crate::error::{Error, Result};
use crate::record::{decode_record_with, encode_record, NullToken, Record, Value};
use crate::schema::Schema;
use crate::types::JsonValue;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

// ============================================================================
// In-memory
// ============================================================================

/// Source over records held in memory
#[derive(Debug, Default)]
pub struct VecSource {
    records: std::vec::IntoIter<Record>,
}

impl VecSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }
}

#[async_trait]
impl RecordSource for VecSource {
    async fn next_batch(&mut self, max: usize) -> Result<Option<Vec<Record>>> {
        let batch: Vec<Record> = self.records.by_ref().take(max).collect();
        Ok(if batch.is_empty() { None } else { Some(batch) })
    }
}

/// Sink collecting records in memory
#[derive(Debug, Default)]
pub struct VecSink {
    /// Records written so far
    pub records: Vec<Record>,
    /// Whether `finish` was called
    pub finished: bool,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordSink for VecSink {
    async fn write(&mut self, records: &[Record]) -> Result<()> {
        self.records.extend_from_slice(records);
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

// ============================================================================
// JSON Lines
// ============================================================================

/// Reads one record per line, decoded against the source schema
///
/// Blank lines are skipped. With an empty schema, lines that are not JSON
/// become a single text value. A string equal to the null token reads as
/// null in any typed column.
pub struct JsonLinesSource<R> {
    lines: Lines<R>,
    schema: Schema,
    null_token: NullToken,
    line_number: usize,
}

impl<R: AsyncBufRead + Unpin + Send> JsonLinesSource<R> {
    pub fn new(reader: R, schema: Schema) -> Self {
        Self {
            lines: reader.lines(),
            schema,
            null_token: NullToken::none(),
            line_number: 0,
        }
    }

    /// Set how the source represents null
    #[must_use]
    pub fn with_null_token(mut self, null_token: NullToken) -> Self {
        self.null_token = null_token;
        self
    }

    fn parse_line(&self, line: &str) -> Result<Record> {
        match serde_json::from_str::<JsonValue>(line) {
            Ok(json) => decode_record_with(&json, &self.schema, &self.null_token),
            Err(_) if self.schema.is_empty() => Ok(vec![Value::Text(line.to_string())]),
            Err(e) => Err(Error::malformed_record(
                self.schema.name(),
                format!("line {}: {e}", self.line_number),
            )),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> RecordSource for JsonLinesSource<R> {
    async fn next_batch(&mut self, max: usize) -> Result<Option<Vec<Record>>> {
        let mut batch = Vec::new();

        while batch.len() < max {
            let Some(line) = self.lines.next_line().await? else {
                break;
            };
            self.line_number += 1;
            if line.trim().is_empty() {
                continue;
            }
            batch.push(self.parse_line(&line)?);
        }

        Ok(if batch.is_empty() { None } else { Some(batch) })
    }
}

/// Writes one JSON array per record
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> RecordSink for JsonLinesSink<W> {
    async fn write(&mut self, records: &[Record]) -> Result<()> {
        let mut buf = Vec::new();
        for record in records {
            serde_json::to_writer(&mut buf, &encode_record(record))?;
            buf.push(b'\n');
        }
        self.writer.write_all(&buf).await?;
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }
}

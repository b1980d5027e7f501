//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, RecordFormat, ReportFormat, TransferArgs};
use crate::cli::report::PlanReport;
use crate::config::{load_schema, load_transfer, TransferConfig};
use crate::error::{Error, Result, ResultExt};
use crate::matcher::Matcher;
use crate::output::{ParquetSink, ParquetWriterConfig};
use crate::record::NullToken;
use crate::pipeline::{
    JsonLinesSink, JsonLinesSource, RecordSink, RecordSource, Transfer, TransferStats,
};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{BufReader, BufWriter};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run {
                transfer,
                input,
                output,
                output_format,
            } => {
                self.run_transfer(transfer, input, output.as_deref(), *output_format)
                    .await?;
                Ok(())
            }
            Commands::Plan { transfer } => self.plan(transfer),
            Commands::Schema { file } => self.schema(file),
        }
    }

    /// Resolve the transfer definition and apply command-line overrides
    pub fn load_transfer(args: &TransferArgs) -> Result<TransferConfig> {
        let mut config = match (&args.config, &args.from, &args.to) {
            (Some(path), _, _) => load_transfer(path)?,
            (None, Some(from), Some(to)) => {
                TransferConfig::new("transfer", load_schema(from)?, load_schema(to)?)
            }
            _ => {
                return Err(Error::config(
                    "Transfer not specified (use --config, or --from with --to)",
                ))
            }
        };

        if let Some(strategy) = args.strategy {
            config.matching.strategy = strategy.into();
        }
        if let Some(token) = &args.null_token {
            config.matching.null_token = Some(token.clone());
        }
        if let Some(batch_size) = args.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(concurrency) = args.concurrency {
            config.concurrency = concurrency;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reconcile an input file (or stdin) into the requested output
    pub async fn run_transfer(
        &self,
        args: &TransferArgs,
        input: &Path,
        output: Option<&Path>,
        format: RecordFormat,
    ) -> Result<TransferStats> {
        let config = Self::load_transfer(args)?;
        let matcher: Arc<dyn Matcher> = Arc::from(config.matcher());
        let transfer = Transfer::new(matcher)
            .with_batch_size(config.batch_size)
            .with_concurrency(config.concurrency);

        let null_token = NullToken::from(config.matching.null_token.clone());
        let mut source: Box<dyn RecordSource> = if input == Path::new("-") {
            Box::new(
                JsonLinesSource::new(BufReader::new(tokio::io::stdin()), config.from.clone())
                    .with_null_token(null_token),
            )
        } else {
            let file = tokio::fs::File::open(input)
                .await
                .with_context(|| format!("Failed to open input '{}'", input.display()))?;
            Box::new(
                JsonLinesSource::new(BufReader::new(file), config.from.clone())
                    .with_null_token(null_token),
            )
        };

        let mut sink: Box<dyn RecordSink> = match (format, output) {
            (RecordFormat::Jsonl, None) => Box::new(JsonLinesSink::new(tokio::io::stdout())),
            (RecordFormat::Jsonl, Some(path)) => {
                let file = tokio::fs::File::create(path)
                    .await
                    .with_context(|| format!("Failed to create output '{}'", path.display()))?;
                Box::new(JsonLinesSink::new(BufWriter::new(file)))
            }
            (RecordFormat::Parquet, Some(path)) => Box::new(ParquetSink::new(
                path,
                config.to.clone(),
                ParquetWriterConfig::default(),
            )),
            (RecordFormat::Parquet, None) => {
                return Err(Error::config("Parquet output requires --output"))
            }
        };

        let stats = transfer.run(source.as_mut(), sink.as_mut()).await?;
        info!(
            transfer = %config.name,
            records = stats.records_written,
            "Done"
        );
        Ok(stats)
    }

    /// Print the resolution plan; fails if any column would be rejected
    fn plan(&self, args: &TransferArgs) -> Result<()> {
        let config = Self::load_transfer(args)?;
        let matcher = config.matcher();
        let report = PlanReport::build(&config.name, matcher.as_ref());

        match self.cli.format {
            ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            ReportFormat::Pretty => print!("{}", report.render()),
        }

        match report.first_rejected() {
            Some(rejected) => Err(Error::schema_mismatch(&rejected.column, &report.to)),
            None => Ok(()),
        }
    }

    /// Validate and print a schema file
    fn schema(&self, file: &Path) -> Result<()> {
        let schema = load_schema(file)?;

        match self.cli.format {
            ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&schema)?),
            ReportFormat::Pretty => {
                println!("{} ({} columns)", schema.name(), schema.len());
                for (i, column) in schema.columns().iter().enumerate() {
                    println!("  [{i}] {column}");
                }
            }
        }
        Ok(())
    }
}

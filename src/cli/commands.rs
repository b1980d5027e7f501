//! CLI commands and argument parsing

use crate::matcher::MatchStrategy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Solidafy Transfer CLI
#[derive(Parser, Debug)]
#[command(name = "solidafy-transfer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for reports (plan, schema)
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: ReportFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile records from the source shape into the destination shape
    Run {
        #[command(flatten)]
        transfer: TransferArgs,

        /// Input file with one JSON record per line ("-" = stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output file (default: stdout, JSON Lines only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Record output format
        #[arg(long, default_value = "jsonl")]
        output_format: RecordFormat,
    },

    /// Show how each destination column will be resolved
    Plan {
        #[command(flatten)]
        transfer: TransferArgs,
    },

    /// Validate and print a schema definition
    Schema {
        /// Schema file (YAML or JSON)
        #[arg(long)]
        file: PathBuf,
    },
}

/// Where the schema pair comes from
#[derive(Args, Debug, Clone, Default)]
pub struct TransferArgs {
    /// Transfer definition file (YAML or JSON)
    #[arg(short = 'C', long, conflicts_with_all = ["from", "to"])]
    pub config: Option<PathBuf>,

    /// Source schema file
    #[arg(long, requires = "to")]
    pub from: Option<PathBuf>,

    /// Destination schema file
    #[arg(long, requires = "from")]
    pub to: Option<PathBuf>,

    /// Override the matching strategy
    #[arg(long)]
    pub strategy: Option<StrategyArg>,

    /// Override the source null token
    #[arg(long)]
    pub null_token: Option<String>,

    /// Override records per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Override workers per batch
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Matching strategy argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyArg {
    /// Match columns by name
    Name,
    /// Match columns by position
    Location,
}

impl From<StrategyArg> for MatchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Name => MatchStrategy::Name,
            StrategyArg::Location => MatchStrategy::Location,
        }
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}

/// Record output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordFormat {
    /// One JSON array per line
    Jsonl,
    /// Parquet file (requires --output)
    Parquet,
}

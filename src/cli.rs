//! `blinkscore` CLI argument surface.
//!
//! Three subcommands, all thin wrappers over the library entry points in
//! [`crate::engine`]: `score` runs the full pipeline over one request;
//! `validate` runs only the tagger and aggregator so an operator can inspect
//! the metric vector before a final score is produced; `batch` fans a JSON
//! array of requests out across a `rayon` thread pool, since invocations
//! share no state and are trivially parallelizable (`spec.md` §5).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "blinkscore")]
#[command(about = "Deterministic credit-risk scoring engine for bank-transaction history")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full scoring pipeline over a JSON scoring request.
    Score {
        /// Path to a JSON `ScoringRequest`, or `-` for stdin.
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Optional TOML configuration overriding the spec-literal defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Tag and aggregate a JSON scoring request without producing a final
    /// score — useful for debugging a tagging disagreement.
    Validate {
        /// Path to a JSON `ScoringRequest`, or `-` for stdin.
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Optional TOML configuration overriding the spec-literal defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Score a JSON array of scoring requests in parallel, one engine
    /// invocation per request.
    Batch {
        /// Path to a JSON array of `ScoringRequest`, or `-` for stdin.
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Optional TOML configuration overriding the spec-literal defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Machine-readable JSON.
    Json,
    /// Human-readable table.
    Table,
}

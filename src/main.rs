//! `blinkscore` CLI entry point.
//!
//! Thin imperative shell around the pure library engine: parse arguments,
//! read a JSON `ScoringRequest` from a file or stdin, initialize tracing,
//! run the engine, and render the result. All scoring logic lives in the
//! library; this binary only does I/O and error rendering.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Table};
use tracing_subscriber::{fmt, EnvFilter};

use blinkscore::cli::{Cli, Commands, OutputFormat};
use blinkscore::{aggregator, config, tagger, BlinkConfig, ScoringRequest};

/// Initialize the tracing subscriber. Default level is `warn`, overridable
/// via `RUST_LOG`. Only the binary installs a global subscriber; the
/// library never does, so it stays embeddable in a host with its own.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_target(false).init();
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading scoring request from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {path}"))
    }
}

fn load_effective_config(path: Option<&PathBuf>) -> Result<BlinkConfig> {
    config::load_config(path.map(|p| p.as_path()))
        .context("loading configuration")
}

fn render_score(request: &ScoringRequest, config: &BlinkConfig, format: OutputFormat) -> Result<()> {
    let result = request.score(config);
    match result {
        Ok(result) => match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            OutputFormat::Table => {
                let mut table = Table::new();
                table.load_preset(UTF8_FULL);
                table.set_header(vec!["field", "value"]);
                table.add_row(vec!["blink_score".into(), result.blink_score.to_string()]);
                table.add_row(vec!["base_score".into(), result.base_score.to_string()]);
                table.add_row(vec![
                    "recommendation".into(),
                    format!("{:?}", result.recommendation),
                ]);
                table.add_row(vec!["od_vol".into(), result.flags.od_vol.to_string()]);
                table.add_row(vec!["cash_crunch".into(), result.flags.cash_crunch.to_string()]);
                table.add_row(vec!["debt_trap".into(), result.flags.debt_trap.to_string()]);
                println!("{table}");
            }
        },
        Err(blinkscore::EngineError::InsufficientHistory { history_days }) => {
            match format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::json!({
                            "error": "insufficient_history",
                            "history_days": history_days,
                        })
                    );
                }
                OutputFormat::Table => {
                    println!(
                        "insufficient history: {history_days} day(s) observed, 90 required"
                    );
                }
            }
        }
        Err(other) => return Err(other.into()),
    }
    Ok(())
}

fn render_validate(request: &ScoringRequest, config: &BlinkConfig, format: OutputFormat) -> Result<()> {
    let tagged = tagger::tag_transactions_at(
        &request.transactions,
        &request.overrides,
        request.context.t0,
        &config.tagger,
    );
    let metrics = aggregator::aggregate(&tagged, &request.balances, &request.context);

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "metrics": metrics,
                    "tagged_transactions": tagged,
                }))?
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["metric", "value"]);
            table.add_row(vec!["history_days".into(), format!("{:?}", metrics.history_days)]);
            table.add_row(vec!["median_paycheck".into(), format!("{:?}", metrics.median_paycheck)]);
            table.add_row(vec![
                "paycheck_regularity".into(),
                format!("{:?}", metrics.paycheck_regularity),
            ]);
            table.add_row(vec![
                "days_since_last_paycheck".into(),
                format!("{:?}", metrics.days_since_last_paycheck),
            ]);
            table.add_row(vec!["overdraft_count90".into(), format!("{:?}", metrics.overdraft_count90)]);
            table.add_row(vec!["clean_buffer7".into(), format!("{:?}", metrics.clean_buffer7)]);
            table.add_row(vec!["buffer_volatility".into(), format!("{:?}", metrics.buffer_volatility)]);
            table.add_row(vec![
                "deposit_multiplicity30".into(),
                format!("{:?}", metrics.deposit_multiplicity30),
            ]);
            table.add_row(vec!["net_cash30".into(), format!("{:?}", metrics.net_cash30)]);
            table.add_row(vec!["debt_load30".into(), format!("{:?}", metrics.debt_load30)]);
            table.add_row(vec!["volatility90".into(), format!("{:?}", metrics.volatility90)]);
            println!("{table}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Score { input, config, format } => {
            let body = read_input(&input)?;
            let request: ScoringRequest =
                serde_json::from_str(&body).context("parsing scoring request JSON")?;
            let effective_config = load_effective_config(config.as_ref())?;
            render_score(&request, &effective_config, format)
        }
        Commands::Validate { input, config, format } => {
            let body = read_input(&input)?;
            let request: ScoringRequest =
                serde_json::from_str(&body).context("parsing scoring request JSON")?;
            let effective_config = load_effective_config(config.as_ref())?;
            render_validate(&request, &effective_config, format)
        }
        Commands::Batch { input, config } => {
            let body = read_input(&input)?;
            let requests: Vec<ScoringRequest> =
                serde_json::from_str(&body).context("parsing scoring request batch JSON")?;
            let effective_config = load_effective_config(config.as_ref())?;
            render_batch(&requests, &effective_config)
        }
    }
}

/// Score every request in `requests` across a `rayon` thread pool. Each
/// invocation is independent and holds no shared mutable state, so this is
/// pure throughput, not new scoring semantics (`spec.md` §5).
fn render_batch(requests: &[ScoringRequest], config: &BlinkConfig) -> Result<()> {
    use rayon::prelude::*;

    let outcomes: Vec<serde_json::Value> = requests
        .par_iter()
        .map(|request| match request.score(config) {
            Ok(result) => serde_json::to_value(result).expect("ScoreResult always serializes"),
            Err(blinkscore::EngineError::InsufficientHistory { history_days }) => {
                serde_json::json!({
                    "error": "insufficient_history",
                    "history_days": history_days,
                })
            }
            Err(other) => serde_json::json!({ "error": other.to_string() }),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&outcomes)?);
    Ok(())
}

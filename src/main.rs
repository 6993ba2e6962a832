mod engine;
mod models;
mod pipeline;
mod profiles;
mod report;
mod source;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{error, info};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{StatementEngine, StatementReport, DEFAULT_RESOLUTION_HINT};
use crate::models::SummaryMetrics;
use crate::pipeline::PipelineError;
use crate::profiles::ProfileRegistry;
use crate::report::{write_account_info, write_ledger, write_summary};

const NO_TRANSACTIONS: &str = "No transactions extracted.";

#[derive(Parser, Debug)]
#[command(name = "statement-normalizer", version, about = "Normalizes extracted bank statement tables into a canonical ledger")]
struct Cli {
    /// Bank identifier or display name, e.g. `canara` or "Axis Bank"
    #[arg(short, long, required_unless_present = "list_banks")]
    bank: Option<String>,

    /// JSON file with additional bank profiles; matching ids replace the built-in ones
    #[arg(long)]
    profiles: Option<PathBuf>,

    /// Resolution the statement pages are rendered at for OCR
    #[arg(long, default_value_t = DEFAULT_RESOLUTION_HINT)]
    dpi: u32,

    /// Statements processed at once (defaults to the available parallelism)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// error, warn, info, debug or trace
    #[arg(long, default_value = "error")]
    log_level: String,

    /// Print the known banks and exit
    #[arg(long, default_value_t = false)]
    list_banks: bool,

    /// Extracted statement tables: a CSV file or a directory of per-page CSV files
    #[arg(required_unless_present = "list_banks")]
    statements: Vec<PathBuf>
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let mut registry = ProfileRegistry::builtin();

    if let Some(path) = &cli.profiles {
        let loaded = registry.load_file(path)?;
        info!("Loaded {loaded} bank profiles from [{}]", path.display());
    }

    if cli.list_banks {
        write_banks_to_stdout(&registry)?;
        return Ok(())
    }

    let Some(bank) = cli.bank.as_deref() else {
        bail!("A bank must be selected with --bank");
    };

    let profile = registry.resolve(bank)?;
    let mut engine = StatementEngine::new(profile).with_resolution_hint(cli.dpi);

    if let Some(jobs) = cli.jobs {
        engine = engine.with_concurrency(jobs);
    }

    let timer = Instant::now();
    let results = engine.run_batch(cli.statements).await;
    let duration = timer.elapsed();

    info!("Processed {} statements in: {duration:?}", results.len());

    if !write_results_to_stdout(&results)? {
        exit(1);
    }

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the ledgers, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_banks_to_stdout(registry: &ProfileRegistry) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    for profile in registry.iter() {
        writeln!(output, "{}\t{}", profile.id, profile.display_name)?;
    }

    output.flush()?;

    Ok(())
}

/// Writes one block per statement in input order. Returns `false` when any statement failed.
fn write_results_to_stdout(results: &[(PathBuf, Result<StatementReport, PipelineError>)]) -> Result<bool> {
    let mut output = BufWriter::new(stdout().lock());
    let mut succeeded = true;

    for (index, (document, result)) in results.iter().enumerate() {
        if index > 0 {
            writeln!(output)?;
        }

        writeln!(output, "# {}", document.display())?;

        match result {
            Ok(report) => {
                write_account_info(&mut output, &report.account)?;

                if report.ledger.is_empty() {
                    writeln!(output, "{NO_TRANSACTIONS}")?;
                } else {
                    write_ledger(&mut output, &report.ledger)?;
                }

                writeln!(output)?;
                write_summary(&mut output, &report.metrics)?;
            }
            Err(PipelineError::NoTableFound) => {
                writeln!(output, "{NO_TRANSACTIONS}")?;
                writeln!(output)?;
                write_summary(&mut output, &SummaryMetrics::zero())?;
            }
            Err(error @ PipelineError::HeaderNotFound { .. }) => {
                succeeded = false;
                error!("Statement [{}] failed: {error}", document.display());
                writeln!(output, "An error occurred while processing: {error}. Please check that the selected bank matches this statement.")?;
            }
            Err(error) => {
                succeeded = false;
                error!("Statement [{}] failed: {error}", document.display());
                writeln!(output, "An error occurred while processing: {error}")?;
            }
        }
    }

    output.flush()?;

    Ok(succeeded)
}

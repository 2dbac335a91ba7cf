//! bookid - assign deterministic identifiers to a book catalogue
//!
//! ## Usage
//!
//! ```bash
//! bookid books.csv
//! bookid books.csv --output keyed.csv --output-column Key
//! ```
//!
//! Identifiers are written into the output column of the table (appended
//! when absent, refreshed when present). Rows whose author field cannot be
//! parsed are logged and left with an empty identifier, and the process
//! exits with a failure status.

use anyhow::{Context, Result};
use bookid::name::InitialsOrder;
use bookid::{CsvAdapter, IdGenerator, IdGeneratorConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Assign deterministic identifiers to a book catalogue
#[derive(Parser)]
#[command(name = "bookid")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input CSV file with author and title columns
    input: PathBuf,

    /// Output file (defaults to rewriting the input in place)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Header of the identifier column
    #[arg(long, default_value = bookid::csv::DEFAULT_OUTPUT_COLUMN)]
    output_column: String,

    /// Field delimiter (detected from the input when omitted)
    #[arg(long)]
    delimiter: Option<char>,

    /// Trim whitespace around author and title values before use
    #[arg(long)]
    trim: bool,

    /// Emit family initial before given initial
    #[arg(long)]
    family_first: bool,

    /// Compute tokens on a single thread
    #[arg(long)]
    sequential: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let content = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    let mut adapter = match cli.delimiter {
        Some(_) => CsvAdapter::new(),
        None => CsvAdapter::with_auto_detection(),
    };
    let delimiter = match cli.delimiter {
        Some(c) => Some(u8::try_from(c).context("Delimiter must be a single-byte character")?),
        None => None,
    };
    {
        let config = adapter.config_mut();
        config.set_output_column(&cli.output_column).set_trim(cli.trim);
        if let Some(delimiter) = delimiter {
            config.set_delimiter(delimiter);
        }
    }

    let filename = cli.input.display().to_string();
    let table = adapter.read(&content).map_err(|e| {
        #[cfg(feature = "diagnostics")]
        eprintln!("{}", e.to_diagnostic(&filename, &content));
        anyhow::Error::new(e).context(format!("Failed to parse {filename}"))
    })?;
    info!(rows = table.len(), file = %filename, "Loaded table");

    let mut config = IdGeneratorConfig::default();
    if cli.family_first {
        config.name.set_order(InitialsOrder::FamilyGiven);
    }
    if cli.sequential {
        config.run_in_parallel = false;
    }

    let outcomes = IdGenerator::with_config(config).generate(&table.records());

    let mut failures = 0usize;
    for err in outcomes.iter().filter_map(|o| o.result.as_ref().err()) {
        failures += 1;
        warn!(row = err.row, field = err.field, value = %err.value, "{}", err.error);
        #[cfg(feature = "diagnostics")]
        eprintln!("{}", err.to_diagnostic(&filename, &content));
    }

    let output = adapter
        .write(&table, &outcomes)
        .context("Failed to serialize table")?;
    let target = cli.output.as_ref().unwrap_or(&cli.input);
    std::fs::write(target, output)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    info!(
        assigned = outcomes.len() - failures,
        failed = failures,
        file = %target.display(),
        "Wrote identifiers"
    );

    if failures > 0 {
        anyhow::bail!("{failures} record(s) have no identifier");
    }
    Ok(())
}

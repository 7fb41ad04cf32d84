//! chunk-inspect CLI.
//!
//! ```bash
//! # One chunk file
//! chunk-inspect training.1234.gz
//!
//! # Every *.gz under a directory, JSON Lines output
//! chunk-inspect --format json data/
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use chunk_inspect::{InspectConfig, Inspector, ReportFormat};

/// Decode gzipped v6 training chunks and print per-record diagnostics.
#[derive(Parser, Debug)]
#[command(name = "chunk-inspect", version, about)]
struct Cli {
    /// Chunk file, or a directory to search recursively.
    path: PathBuf,

    /// Extension of chunk files in directory mode.
    #[arg(long, default_value = "gz")]
    extension: String,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Only print per-file counts and the grand total.
    #[arg(long)]
    summary_only: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = InspectConfig::default()
        .with_extension(cli.extension)
        .with_format(cli.format)
        .with_summary_only(cli.summary_only);

    let inspector = Inspector::new(config).context("record layout check failed")?;
    let stdout = io::stdout();
    inspector
        .run(&cli.path, stdout.lock())
        .context("failed to write report")?;

    Ok(())
}

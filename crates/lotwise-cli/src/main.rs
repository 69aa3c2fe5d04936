//! Lotwise CLI - Command-line interface for index adjustment.
//!
//! # Usage
//!
//! ```bash
//! # Allocate a budget across an index snapshot
//! lotwise allocate --index sp500.csv --budget 25000
//!
//! # Same, skipping a sector and keeping only the cheaper half by PE
//! lotwise allocate --index sp500.csv --budget 25000 --skip-sector Energy --pe-quantile 50
//!
//! # Spend new cash on an existing portfolio
//! lotwise adjust --index sp500.csv --holdings portfolio.csv --top-up 5000
//!
//! # Sector breakdown of a portfolio as JSON
//! lotwise --format json breakdown --index sp500.csv --holdings portfolio.csv --by sector
//! lotwise breakdown --index sp500.csv --by industry
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let format = cli.format;

    match cli.command {
        Commands::Allocate(args) => commands::allocate::execute(args, format)?,
        Commands::Adjust(args) => commands::adjust::execute(args, format)?,
        Commands::Breakdown(args) => commands::breakdown::execute(args, format)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays parseable.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

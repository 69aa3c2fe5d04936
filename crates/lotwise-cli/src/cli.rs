//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{AdjustArgs, AllocateArgs, BreakdownArgs};

/// Lotwise - Whole-share index tracking CLI
#[derive(Parser)]
#[command(name = "lotwise")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Log search progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Allocate a budget across an index in whole shares
    Allocate(AllocateArgs),

    /// Compute purchases that move existing holdings toward the index
    Adjust(AdjustArgs),

    /// Break holdings, or the index itself, down by country, sector or industry
    Breakdown(BreakdownArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

//! Allocate command implementation.
//!
//! Allocates a budget across an index snapshot in whole shares.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;

use lotwise_adjust::allocate_rows;
use lotwise_ext_file::load_index;

use crate::cli::OutputFormat;
use crate::commands::{parse_positive, FilterArgs};
use crate::output::{print_output, print_summary, print_warning, KeyValue, PositionRow};

/// Arguments for the allocate command.
#[derive(Args, Debug)]
pub struct AllocateArgs {
    /// Index snapshot CSV
    #[arg(short, long)]
    pub index: PathBuf,

    /// Cash to allocate
    #[arg(short, long, value_parser = parse_positive)]
    pub budget: Decimal,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Execute the allocate command.
pub fn execute(args: AllocateArgs, format: OutputFormat) -> Result<()> {
    let (options, config) = args.filters.settings()?;
    let rows = load_index(&args.index)?;

    let allocation = allocate_rows(&rows, &options, args.budget, &config)?;

    if allocation.is_empty() {
        print_warning("Budget too small: no position clears the minimum lot price.");
    }

    let positions: Vec<PositionRow> = allocation.iter().map(PositionRow::from).collect();
    print_output(&positions, &allocation, format)?;

    print_summary(
        "Summary",
        &[
            KeyValue::from_money("Budget", allocation.budget),
            KeyValue::from_money("Total Cost", allocation.total_cost),
            KeyValue::from_money("Remaining Cash", allocation.remaining_cash()),
            KeyValue::new("Positions", allocation.len().to_string()),
        ],
        format,
    )
}

//! Adjust command implementation.
//!
//! Spends new cash on an existing portfolio so it moves toward the index.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;

use lotwise_adjust::adjust_portfolio;
use lotwise_ext_file::{load_holdings, load_index};

use crate::cli::OutputFormat;
use crate::commands::{parse_positive, FilterArgs};
use crate::output::{print_output, print_summary, KeyValue, PositionRow};

/// Arguments for the adjust command.
#[derive(Args, Debug)]
pub struct AdjustArgs {
    /// Index snapshot CSV
    #[arg(short, long)]
    pub index: PathBuf,

    /// Current holdings CSV (ticker,amount)
    #[arg(long)]
    pub holdings: PathBuf,

    /// New cash available for purchases
    #[arg(short, long, value_parser = parse_positive)]
    pub top_up: Decimal,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Execute the adjust command.
pub fn execute(args: AdjustArgs, format: OutputFormat) -> Result<()> {
    let (options, config) = args.filters.settings()?;
    let rows = load_index(&args.index)?;
    let holdings = load_holdings(&args.holdings)?;

    let result = adjust_portfolio(&rows, &options, &holdings, args.top_up, &config)?;

    let purchases: Vec<PositionRow> = result.purchases.iter().map(PositionRow::from).collect();
    print_output(&purchases, &result, format)?;

    print_summary(
        "Summary",
        &[
            KeyValue::from_money("Holdings Value", result.holdings_value),
            KeyValue::from_money("Top-up", result.top_up),
            KeyValue::from_money("Target Value", result.target.total_cost),
            KeyValue::from_money("Spent", result.spent()),
            KeyValue::from_money("Remaining Cash", result.remaining_cash()),
        ],
        format,
    )
}

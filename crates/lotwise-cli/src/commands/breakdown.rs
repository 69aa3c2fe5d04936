//! Breakdown command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use lotwise_adjust::{breakdown, index_breakdown, Dimension};
use lotwise_core::IndexRow;
use lotwise_ext_file::{load_holdings, load_index};

use crate::cli::OutputFormat;
use crate::output::{
    print_output, print_summary, print_warning, BucketRow, IndexBucketRow, KeyValue,
};

/// Grouping options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GroupBy {
    /// Country of the issuer
    Country,
    /// Sector
    #[default]
    Sector,
    /// Industry
    Industry,
}

impl From<GroupBy> for Dimension {
    fn from(group: GroupBy) -> Self {
        match group {
            GroupBy::Country => Dimension::Country,
            GroupBy::Sector => Dimension::Sector,
            GroupBy::Industry => Dimension::Industry,
        }
    }
}

/// Arguments for the breakdown command.
#[derive(Args, Debug)]
pub struct BreakdownArgs {
    /// Index snapshot CSV providing prices and classification
    #[arg(short, long)]
    pub index: PathBuf,

    /// Holdings CSV (ticker,amount); without it the index itself is broken down
    #[arg(long)]
    pub holdings: Option<PathBuf>,

    /// Attribute to group by
    #[arg(long, value_enum, default_value = "sector")]
    pub by: GroupBy,
}

/// Execute the breakdown command.
pub fn execute(args: BreakdownArgs, format: OutputFormat) -> Result<()> {
    let rows = load_index(&args.index)?;
    let Some(holdings_path) = args.holdings else {
        return execute_index(&rows, args.by.into(), format);
    };
    let holdings = load_holdings(&holdings_path)?;

    let result = breakdown(&rows, &holdings, args.by.into());

    if !result.unpriced.is_empty() {
        let tickers: Vec<&str> = result.unpriced.iter().map(|t| t.as_str()).collect();
        print_warning(&format!("Not in index, left out: {}", tickers.join(", ")));
    }

    let buckets: Vec<BucketRow> = result.buckets.iter().map(BucketRow::from).collect();
    print_output(&buckets, &result, format)?;

    print_summary(
        "Summary",
        &[
            KeyValue::new("Grouped By", result.dimension.to_string()),
            KeyValue::from_money("Market Value", result.total_market_value),
        ],
        format,
    )
}

fn execute_index(rows: &[IndexRow], dimension: Dimension, format: OutputFormat) -> Result<()> {
    let result = index_breakdown(rows, dimension);

    let buckets: Vec<IndexBucketRow> = result.buckets.iter().map(IndexBucketRow::from).collect();
    print_output(&buckets, &result, format)?;

    print_summary(
        "Summary",
        &[
            KeyValue::new("Grouped By", result.dimension.to_string()),
            KeyValue::new("Constituents", result.constituents.to_string()),
        ],
        format,
    )
}

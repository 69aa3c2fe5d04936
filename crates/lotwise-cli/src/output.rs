//! Output formatting utilities.

use colored::Colorize;
use lotwise_adjust::{AllocationEntry, Bucket, IndexBucket};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Prints rows as a table or CSV, or `document` as JSON.
///
/// JSON output carries the full result, tables and CSV only the rows.
pub fn print_output<T, D>(rows: &[T], document: &D, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + Tabled,
    D: Serialize,
{
    match format {
        OutputFormat::Table => print_table(rows),
        OutputFormat::Json => print_json(document),
        OutputFormat::Csv => print_csv(rows),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints a summary block in table mode.
pub fn print_summary(title: &str, items: &[KeyValue], format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Table {
        print_header(title);
        print_table(items)?;
    }
    Ok(())
}

/// Formats money with two decimals.
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Formats a weight in percent.
pub fn format_weight(value: Decimal) -> String {
    format!("{:.4}%", value)
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from a money amount.
    pub fn from_money(key: impl Into<String>, value: Decimal) -> Self {
        Self::new(key, format_money(value))
    }
}

/// One allocated or purchased position.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PositionRow {
    #[tabled(rename = "Ticker")]
    pub ticker: String,
    #[tabled(rename = "Symbol")]
    pub symbol: String,
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "Weight")]
    pub weight: String,
    #[tabled(rename = "Shares")]
    pub amount: u64,
    #[tabled(rename = "Cost")]
    pub cost: String,
}

impl From<&AllocationEntry> for PositionRow {
    fn from(entry: &AllocationEntry) -> Self {
        Self {
            ticker: entry.ticker.to_string(),
            symbol: entry.display_symbol().to_string(),
            price: entry.price.to_string(),
            weight: format_weight(entry.weight),
            amount: entry.amount,
            cost: format_money(entry.cost),
        }
    }
}

/// One breakdown group.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct BucketRow {
    #[tabled(rename = "Group")]
    pub name: String,
    #[tabled(rename = "Holdings")]
    pub count: usize,
    #[tabled(rename = "Market Value")]
    pub market_value: String,
    #[tabled(rename = "Weight")]
    pub weight: String,
}

impl From<&Bucket> for BucketRow {
    fn from(bucket: &Bucket) -> Self {
        Self {
            name: bucket.name.clone(),
            count: bucket.count,
            market_value: format_money(bucket.market_value),
            weight: format_weight(bucket.weight),
        }
    }
}

/// Row for one index group.
#[derive(Debug, Serialize, Tabled)]
pub struct IndexBucketRow {
    #[tabled(rename = "Group")]
    pub name: String,
    #[tabled(rename = "Constituents")]
    pub count: usize,
    #[tabled(rename = "Share")]
    pub share: String,
    #[tabled(rename = "Index Weight")]
    pub index_weight: String,
}

impl From<&IndexBucket> for IndexBucketRow {
    fn from(bucket: &IndexBucket) -> Self {
        Self {
            name: bucket.name.clone(),
            count: bucket.count,
            share: format_weight(bucket.share),
            index_weight: format_weight(bucket.index_weight),
        }
    }
}

//! Index snapshot CSV loading.
//!
//! Expected headers:
//!
//! ```text
//! ticker,symbol,price,weight,country,sector,industry,pe,exchange_available
//! ```
//!
//! Only `ticker`, `price` and `weight` are required. Empty cells mean "not
//! known"; `exchange_available` defaults to `true`.

use std::path::Path;
use std::str::FromStr;

use lotwise_core::{Classification, IndexRow};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{FileError, FileResult};

// =============================================================================
// CSV INDEX SOURCE
// =============================================================================

/// CSV record for index rows.
#[derive(Debug, Deserialize)]
struct IndexRecord {
    ticker: String,
    #[serde(default)]
    symbol: Option<String>,
    price: String,
    weight: String,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default)]
    pe: Option<String>,
    #[serde(default)]
    exchange_available: Option<String>,
}

/// Loads index rows from a CSV file.
///
/// Values are only parsed here; price and weight validation belongs to the
/// candidate set so that every rejection reports the same way.
pub fn load_index(path: impl AsRef<Path>) -> FileResult<Vec<IndexRow>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| FileError::from_csv(path, &e))?;

    let mut rows = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let record: IndexRecord = result.map_err(|e| FileError::from_csv(path, &e))?;
        rows.push(to_row(record, i + 1).map_err(|message| FileError::parse(path, message))?);
    }

    debug!(path = %path.display(), rows = rows.len(), "loaded index");
    Ok(rows)
}

fn to_row(record: IndexRecord, line: usize) -> Result<IndexRow, String> {
    let ticker = record.ticker.trim();
    if ticker.is_empty() {
        return Err(format!("record {line}: empty ticker"));
    }

    let price = decimal(&record.price, "price", line)?;
    let weight = decimal(&record.weight, "weight", line)?;

    let classification = Classification {
        country: non_empty(record.country),
        sector: non_empty(record.sector),
        industry: non_empty(record.industry),
    };

    let mut row = IndexRow::new(ticker, price, weight).with_classification(classification);
    if let Some(symbol) = non_empty(record.symbol) {
        row = row.with_symbol(symbol);
    }
    if let Some(pe) = non_empty(record.pe) {
        row = row.with_pe(decimal(&pe, "pe", line)?);
    }
    if let Some(flag) = non_empty(record.exchange_available) {
        row = row.with_exchange_available(flag_value(&flag, line)?);
    }
    Ok(row)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn decimal(raw: &str, field: &str, line: usize) -> Result<Decimal, String> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| format!("record {line}: invalid {field} '{trimmed}'"))
}

fn flag_value(raw: &str, line: usize) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(format!("record {line}: invalid exchange_available '{other}'")),
    }
}

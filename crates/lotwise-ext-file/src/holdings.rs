//! Portfolio holdings CSV loading.
//!
//! Expected headers: `ticker,amount`.

use std::path::Path;

use lotwise_core::Holding;
use serde::Deserialize;
use tracing::debug;

use crate::error::{FileError, FileResult};

/// CSV record for holdings.
#[derive(Debug, Deserialize)]
struct HoldingRecord {
    ticker: String,
    amount: u64,
}

/// Loads holdings from a CSV file.
pub fn load_holdings(path: impl AsRef<Path>) -> FileResult<Vec<Holding>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| FileError::from_csv(path, &e))?;

    let mut holdings = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let record: HoldingRecord = result.map_err(|e| FileError::from_csv(path, &e))?;
        let ticker = record.ticker.trim();
        if ticker.is_empty() {
            return Err(FileError::parse(path, format!("record {}: empty ticker", i + 1)));
        }
        holdings.push(Holding::new(ticker, record.amount));
    }

    debug!(path = %path.display(), holdings = holdings.len(), "loaded holdings");
    Ok(holdings)
}

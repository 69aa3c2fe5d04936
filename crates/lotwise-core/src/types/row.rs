//! Index constituent rows.

use super::{Classification, TickerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// One weighted constituent of an index, as materialized by the data layer.
///
/// Rows are read-only snapshots: the allocation engine never mutates them and
/// builds its own candidate set from them for every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRow {
    /// Resolved ticker identity.
    pub ticker: TickerId,

    /// Trading symbol, for display only.
    #[serde(default)]
    pub symbol: Option<String>,

    /// Price per share in the budget currency.
    pub price: Decimal,

    /// Index weight. Any positive scale; weights are renormalized to 100.
    pub weight: Decimal,

    /// Classification used for exclusion filters and breakdowns.
    #[serde(default)]
    pub classification: Classification,

    /// Price/earnings ratio, if known.
    #[serde(default)]
    pub pe: Option<Decimal>,

    /// Whether the listing exchange is currently tradeable.
    #[serde(default = "default_true")]
    pub exchange_available: bool,
}

impl IndexRow {
    /// Creates a row with no classification, no PE and an available exchange.
    pub fn new(ticker: impl Into<TickerId>, price: Decimal, weight: Decimal) -> Self {
        Self {
            ticker: ticker.into(),
            symbol: None,
            price,
            weight,
            classification: Classification::default(),
            pe: None,
            exchange_available: true,
        }
    }

    /// Sets the display symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Sets the classification.
    #[must_use]
    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    /// Sets the PE ratio.
    #[must_use]
    pub fn with_pe(mut self, pe: Decimal) -> Self {
        self.pe = Some(pe);
        self
    }

    /// Sets whether the listing exchange is available.
    #[must_use]
    pub fn with_exchange_available(mut self, available: bool) -> Self {
        self.exchange_available = available;
        self
    }

    /// Symbol if present, otherwise the ticker identifier.
    pub fn display_symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or(self.ticker.as_str())
    }
}

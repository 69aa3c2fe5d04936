//! Allocation results.

use crate::candidates::Candidate;
use lotwise_core::{Classification, TickerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whole-share allocation for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    /// Ticker identity.
    pub ticker: TickerId,

    /// Display symbol, if known.
    pub symbol: Option<String>,

    /// Price per share.
    pub price: Decimal,

    /// Weight in percent, renormalized over the surviving entries.
    pub weight: Decimal,

    /// Number of whole shares.
    pub amount: u64,

    /// `amount * price`.
    pub cost: Decimal,

    /// Classification carried through for reporting.
    #[serde(default)]
    pub classification: Classification,
}

impl AllocationEntry {
    /// Builds an entry for a candidate with the given share count.
    #[must_use]
    pub fn from_candidate(candidate: &Candidate, amount: u64) -> Self {
        Self {
            ticker: candidate.ticker.clone(),
            symbol: candidate.symbol.clone(),
            price: candidate.price,
            weight: candidate.weight,
            amount,
            cost: Decimal::from(amount) * candidate.price,
            classification: candidate.classification.clone(),
        }
    }

    /// Returns a copy with a different share count and the cost recomputed.
    #[must_use]
    pub fn with_amount(&self, amount: u64) -> Self {
        Self {
            amount,
            cost: Decimal::from(amount) * self.price,
            ..self.clone()
        }
    }

    /// Symbol if present, otherwise the ticker identifier.
    #[must_use]
    pub fn display_symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or(self.ticker.as_str())
    }
}

/// A complete allocation: entries in descending weight order plus totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Entries with a nonzero share count.
    pub entries: Vec<AllocationEntry>,

    /// Cash the allocation had to fit into.
    pub budget: Decimal,

    /// Virtual spend the proportional split was computed against.
    pub virtual_spend: Decimal,

    /// Sum of entry costs. Never exceeds `budget`.
    pub total_cost: Decimal,
}

impl Allocation {
    /// Builds an allocation, summing the entry costs.
    #[must_use]
    pub fn new(entries: Vec<AllocationEntry>, budget: Decimal, virtual_spend: Decimal) -> Self {
        let total_cost = entries.iter().map(|e| e.cost).sum();
        Self {
            entries,
            budget,
            virtual_spend,
            total_cost,
        }
    }

    /// An allocation with no entries.
    #[must_use]
    pub fn empty(budget: Decimal) -> Self {
        Self::new(Vec::new(), budget, Decimal::ZERO)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Budget left unspent.
    #[must_use]
    pub fn remaining_cash(&self) -> Decimal {
        self.budget - self.total_cost
    }

    /// Looks up the entry for a ticker.
    #[must_use]
    pub fn get(&self, ticker: &TickerId) -> Option<&AllocationEntry> {
        self.entries.iter().find(|e| &e.ticker == ticker)
    }

    /// Tickers in entry order.
    pub fn tickers(&self) -> impl Iterator<Item = &TickerId> {
        self.entries.iter().map(|e| &e.ticker)
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &AllocationEntry> {
        self.entries.iter()
    }
}

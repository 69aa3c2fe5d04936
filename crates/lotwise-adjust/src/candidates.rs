//! Weighted candidate sets.
//!
//! A [`CandidateSet`] is the immutable, filtered and normalized snapshot of an
//! index that the allocator works on. It is rebuilt for every request.

use crate::config::AdjustOptions;
use crate::error::{AdjustError, AdjustResult};
use crate::normalize::normalize_by;
use lotwise_core::{Classification, IndexRow, TickerId};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// A ticker eligible for allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Ticker identity.
    pub ticker: TickerId,

    /// Display symbol, if known.
    pub symbol: Option<String>,

    /// Price per share.
    pub price: Decimal,

    /// Target weight in percent.
    pub weight: Decimal,

    /// Classification carried through for reporting.
    pub classification: Classification,
}

impl Candidate {
    /// Creates a candidate with an empty classification.
    pub fn new(ticker: impl Into<TickerId>, price: Decimal, weight: Decimal) -> Self {
        Self {
            ticker: ticker.into(),
            symbol: None,
            price,
            weight,
            classification: Classification::default(),
        }
    }
}

impl From<&IndexRow> for Candidate {
    fn from(row: &IndexRow) -> Self {
        Self {
            ticker: row.ticker.clone(),
            symbol: row.symbol.clone(),
            price: row.price,
            weight: row.weight,
            classification: row.classification.clone(),
        }
    }
}

/// Descending weight, ties broken by ticker identity.
pub(crate) fn by_weight_desc(
    a_weight: Decimal,
    a: &TickerId,
    b_weight: Decimal,
    b: &TickerId,
) -> Ordering {
    b_weight.cmp(&a_weight).then_with(|| a.cmp(b))
}

/// Validated, ordered, normalized candidates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    /// Builds a set from pre-filtered candidates.
    ///
    /// Rejects empty input, non-positive prices or weights and duplicate
    /// tickers. The result is sorted by descending weight and normalized to 100.
    pub fn new(candidates: Vec<Candidate>) -> AdjustResult<Self> {
        validate(candidates.iter().map(|c| (&c.ticker, c.price, c.weight)))?;
        if candidates.is_empty() {
            return Err(AdjustError::EmptyCandidateSet);
        }

        let mut candidates = candidates;
        candidates.sort_by(|a, b| by_weight_desc(a.weight, &a.ticker, b.weight, &b.ticker));
        normalize_by(&mut candidates, |c| &mut c.weight);

        Ok(Self { candidates })
    }

    /// Filters raw index rows with the given options and builds a set.
    ///
    /// The whole input is validated first, so a malformed row fails the
    /// request even if a filter would have removed it.
    ///
    /// # Errors
    ///
    /// `EmptyCandidateSet` when every row is filtered out, plus the
    /// validation errors of [`CandidateSet::new`] and `InvalidQuantile`.
    pub fn from_rows(rows: &[IndexRow], options: &AdjustOptions) -> AdjustResult<Self> {
        options.validate()?;
        validate(rows.iter().map(|r| (&r.ticker, r.price, r.weight)))?;

        let pe_cutoff = match options.pe_quantile {
            Some(q) => pe_threshold(rows, q)?,
            None => None,
        };

        let candidates: Vec<Candidate> = rows
            .iter()
            .filter(|row| keep_row(row, options, pe_cutoff))
            .map(Candidate::from)
            .collect();

        debug!(
            rows = rows.len(),
            kept = candidates.len(),
            pe_cutoff = ?pe_cutoff,
            "filtered index rows"
        );

        Self::new(candidates)
    }

    /// Candidates in descending weight order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Iterates over the candidates.
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Number of candidates (never zero).
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// True if the set has no candidates, which construction rules out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Looks up a candidate by ticker.
    #[must_use]
    pub fn get(&self, ticker: &TickerId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| &c.ticker == ticker)
    }

    /// Sum of the weights (100 up to decimal precision).
    #[must_use]
    pub fn total_weight(&self) -> Decimal {
        self.candidates.iter().map(|c| c.weight).sum()
    }

    /// Lowest price among the candidates.
    #[must_use]
    pub fn min_price(&self) -> Decimal {
        self.candidates
            .iter()
            .map(|c| c.price)
            .min()
            .unwrap_or(Decimal::ZERO)
    }
}

fn validate<'a>(
    entries: impl Iterator<Item = (&'a TickerId, Decimal, Decimal)>,
) -> AdjustResult<()> {
    let mut seen = HashSet::new();
    for (ticker, price, weight) in entries {
        if price <= Decimal::ZERO {
            return Err(AdjustError::non_positive_price(ticker.as_str(), price));
        }
        if weight <= Decimal::ZERO {
            return Err(AdjustError::invalid_weight(ticker.as_str(), weight));
        }
        if !seen.insert(ticker) {
            return Err(AdjustError::duplicate_ticker(ticker.as_str()));
        }
    }
    Ok(())
}

fn keep_row(row: &IndexRow, options: &AdjustOptions, pe_cutoff: Option<Decimal>) -> bool {
    let denied = |value: &Option<String>, denylist: &BTreeSet<String>| {
        value.as_ref().is_some_and(|v| denylist.contains(v))
    };

    if options.skip_tickers.contains(&row.ticker) {
        return false;
    }
    if options.skip_unavailable_exchanges && !row.exchange_available {
        return false;
    }
    if denied(&row.classification.country, &options.skip_countries)
        || denied(&row.classification.sector, &options.skip_sectors)
        || denied(&row.classification.industry, &options.skip_industries)
    {
        return false;
    }
    match (pe_cutoff, row.pe) {
        (Some(cutoff), Some(pe)) => pe <= cutoff,
        _ => true,
    }
}

/// PE value at the given percentile across rows that have a PE.
///
/// Uses linear interpolation between closest ranks, with the rank at
/// `quantile / 100 * (n - 1)` over the ascending PE values. Returns `None`
/// when no row has a PE, in which case no PE filtering applies.
///
/// # Example
///
/// ```rust
/// use lotwise_adjust::candidates::pe_threshold;
/// use lotwise_core::IndexRow;
/// use rust_decimal_macros::dec;
///
/// let rows = vec![
///     IndexRow::new("A", dec!(10), dec!(1)).with_pe(dec!(10)),
///     IndexRow::new("B", dec!(10), dec!(1)).with_pe(dec!(20)),
///     IndexRow::new("C", dec!(10), dec!(1)),
/// ];
/// assert_eq!(pe_threshold(&rows, dec!(50)).unwrap(), Some(dec!(15)));
/// ```
pub fn pe_threshold(rows: &[IndexRow], quantile: Decimal) -> AdjustResult<Option<Decimal>> {
    if quantile < Decimal::ZERO || quantile > Decimal::ONE_HUNDRED {
        return Err(AdjustError::invalid_quantile(quantile));
    }

    let mut values: Vec<Decimal> = rows.iter().filter_map(|r| r.pe).collect();
    if values.is_empty() {
        return Ok(None);
    }
    values.sort();

    let last = Decimal::from(values.len() - 1);
    let rank = quantile / Decimal::ONE_HUNDRED * last;
    let lower = rank.floor();
    let fraction = rank - lower;
    let lo = lower.to_usize().unwrap_or(0);
    let hi = (lo + 1).min(values.len() - 1);

    Ok(Some(values[lo] + (values[hi] - values[lo]) * fraction))
}

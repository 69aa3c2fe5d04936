//! End-to-end entry points.
//!
//! [`allocate`] and [`diff_and_pack`] are the two operations collaborators call.
//! [`adjust_portfolio`] chains them for an existing portfolio receiving new cash.

use crate::allocation::Allocation;
use crate::allocator::LotAllocator;
use crate::candidates::CandidateSet;
use crate::config::{AdjustOptions, AllocatorConfig};
use crate::diff::portfolio_diff;
use crate::error::{AdjustError, AdjustResult};
use crate::packer::pack;
use lotwise_core::{Holding, IndexRow, TickerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Allocates `budget` across a prepared candidate set.
pub fn allocate(
    candidates: &CandidateSet,
    budget: Decimal,
    config: &AllocatorConfig,
) -> AdjustResult<Allocation> {
    LotAllocator::new(config).allocate(candidates, budget)
}

/// Filters and normalizes raw index rows, then allocates `budget`.
///
/// # Errors
///
/// Fails on an invalid budget before looking at the rows, then on any
/// row or filtering error from [`CandidateSet::from_rows`].
pub fn allocate_rows(
    rows: &[IndexRow],
    options: &AdjustOptions,
    budget: Decimal,
    config: &AllocatorConfig,
) -> AdjustResult<Allocation> {
    if budget <= Decimal::ZERO {
        return Err(AdjustError::invalid_budget(budget));
    }
    let candidates = CandidateSet::from_rows(rows, options)?;
    allocate(&candidates, budget, config)
}

/// Purchases that move `holdings` toward `target`, fitted into `top_up`.
///
/// The returned allocation has `top_up` as its budget and keeps the target
/// weights of the purchased tickers.
///
/// # Errors
///
/// `InvalidBudget` for a non-positive top-up, `InvalidConfig` for unusable
/// settings and `NonPositivePrice` for any target entry priced at or below
/// zero.
pub fn diff_and_pack(
    target: &Allocation,
    holdings: &[Holding],
    top_up: Decimal,
    config: &AllocatorConfig,
) -> AdjustResult<Allocation> {
    if top_up <= Decimal::ZERO {
        return Err(AdjustError::invalid_budget(top_up));
    }
    config.validate()?;
    if let Some(entry) = target.iter().find(|e| e.price <= Decimal::ZERO) {
        return Err(AdjustError::non_positive_price(entry.ticker.as_str(), entry.price));
    }

    let diff = portfolio_diff(&target.entries, holdings, config.min_lot_price);
    let purchases = pack(&diff, top_up);

    Ok(Allocation::new(purchases, top_up, target.virtual_spend))
}

/// Result of adjusting an existing portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAdjustment {
    /// Target allocation for holdings value plus top-up.
    pub target: Allocation,

    /// Shares to buy with the top-up.
    pub purchases: Allocation,

    /// Value of the holdings that belong to the index, at index prices.
    pub holdings_value: Decimal,

    /// New cash available.
    pub top_up: Decimal,
}

impl PortfolioAdjustment {
    /// Cash spent on purchases.
    #[must_use]
    pub fn spent(&self) -> Decimal {
        self.purchases.total_cost
    }

    /// Top-up left after purchases.
    #[must_use]
    pub fn remaining_cash(&self) -> Decimal {
        self.purchases.remaining_cash()
    }
}

/// Rebalances an existing portfolio toward the index with `top_up` new cash.
///
/// The target is computed against the index-priced value of the holdings in
/// index tickers plus `top_up`. Holdings outside the index are ignored.
pub fn adjust_portfolio(
    rows: &[IndexRow],
    options: &AdjustOptions,
    holdings: &[Holding],
    top_up: Decimal,
    config: &AllocatorConfig,
) -> AdjustResult<PortfolioAdjustment> {
    if top_up <= Decimal::ZERO {
        return Err(AdjustError::invalid_budget(top_up));
    }

    let holdings_value = index_holdings_value(rows, holdings);
    let target = allocate_rows(rows, options, holdings_value + top_up, config)?;
    let purchases = diff_and_pack(&target, holdings, top_up, config)?;

    info!(
        %holdings_value,
        target_positions = target.len(),
        purchases = purchases.len(),
        spent = %purchases.total_cost,
        "adjusted portfolio"
    );

    Ok(PortfolioAdjustment {
        target,
        purchases,
        holdings_value,
        top_up,
    })
}

/// Market value of the holdings whose ticker appears in `rows`.
#[must_use]
pub fn index_holdings_value(rows: &[IndexRow], holdings: &[Holding]) -> Decimal {
    let prices: HashMap<&TickerId, Decimal> = rows.iter().map(|r| (&r.ticker, r.price)).collect();
    holdings
        .iter()
        .filter_map(|h| prices.get(&h.ticker).map(|p| h.market_value(*p)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::Candidate;
    use rust_decimal_macros::dec;

    fn no_lot_floor() -> AllocatorConfig {
        AllocatorConfig::new().with_min_lot_price(dec!(0))
    }

    #[test]
    fn test_diff_and_pack_partial_holding() {
        let candidate = Candidate::new("1", dec!(20), dec!(100));
        let target = Allocation::new(
            vec![crate::allocation::AllocationEntry::from_candidate(&candidate, 10)],
            dec!(200),
            dec!(200),
        );
        let holdings = vec![Holding::new("1", 7)];

        let purchases = diff_and_pack(&target, &holdings, dec!(60), &no_lot_floor()).unwrap();
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases.entries[0].amount, 3);
        assert_eq!(purchases.total_cost, dec!(60));
        assert_eq!(purchases.budget, dec!(60));
    }

    #[test]
    fn test_diff_and_pack_rejects_top_up() {
        let target = Allocation::empty(dec!(100));
        assert_eq!(
            diff_and_pack(&target, &[], dec!(0), &no_lot_floor()),
            Err(AdjustError::invalid_budget(dec!(0)))
        );
    }

    #[test]
    fn test_diff_and_pack_rejects_unpriced_target() {
        let free = Candidate::new("A", dec!(0), dec!(100));
        let target = Allocation::new(
            vec![crate::allocation::AllocationEntry::from_candidate(&free, 5)],
            dec!(100),
            dec!(100),
        );

        assert_eq!(
            diff_and_pack(&target, &[], dec!(50), &no_lot_floor()),
            Err(AdjustError::non_positive_price("A", dec!(0)))
        );
    }

    #[test]
    fn test_allocate_rows_checks_budget_first() {
        assert_eq!(
            allocate_rows(&[], &AdjustOptions::new(), dec!(-5), &no_lot_floor()),
            Err(AdjustError::invalid_budget(dec!(-5)))
        );
    }

    #[test]
    fn test_index_holdings_value() {
        let rows = vec![
            IndexRow::new("A", dec!(10), dec!(50)),
            IndexRow::new("B", dec!(20), dec!(50)),
        ];
        let holdings = vec![
            Holding::new("A", 3),
            Holding::new("B", 1),
            Holding::new("OUTSIDE", 100),
        ];
        assert_eq!(index_holdings_value(&rows, &holdings), dec!(50));
    }

    #[test]
    fn test_adjust_portfolio() {
        let rows = vec![
            IndexRow::new("1", dec!(100), dec!(60)),
            IndexRow::new("2", dec!(50), dec!(40)),
        ];
        // 300 held in ticker 1, 700 new cash: target is 6 and 8 shares
        let holdings = vec![Holding::new("1", 3)];

        let result = adjust_portfolio(
            &rows,
            &AdjustOptions::new(),
            &holdings,
            dec!(700),
            &no_lot_floor(),
        )
        .unwrap();

        assert_eq!(result.holdings_value, dec!(300));
        assert_eq!(result.target.total_cost, dec!(1000));
        assert_eq!(result.purchases.get(&TickerId::from("1")).map(|e| e.amount), Some(3));
        assert_eq!(result.purchases.get(&TickerId::from("2")).map(|e| e.amount), Some(8));
        assert_eq!(result.spent(), dec!(700));
        assert!(result.remaining_cash().is_zero());
    }
}

//! Difference between a target allocation and existing holdings.

use crate::allocation::AllocationEntry;
use crate::candidates::by_weight_desc;
use lotwise_core::{Holding, TickerId};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

/// Shares still to buy to reach `target` from `holdings`.
///
/// Tickers already held at or above target, and tickers whose missing shares
/// cost less than `min_lot_price`, are left out. Holdings of the same ticker
/// are summed. The result is ordered by descending target weight, ties broken
/// by ticker.
#[must_use]
pub fn portfolio_diff(
    target: &[AllocationEntry],
    holdings: &[Holding],
    min_lot_price: Decimal,
) -> Vec<AllocationEntry> {
    let mut held: HashMap<&TickerId, u64> = HashMap::with_capacity(holdings.len());
    for holding in holdings {
        let owned = held.entry(&holding.ticker).or_default();
        *owned = owned.saturating_add(holding.amount);
    }

    let mut diff: Vec<AllocationEntry> = target
        .iter()
        .filter_map(|entry| {
            let owned = held.get(&entry.ticker).copied().unwrap_or(0);
            let needed = entry.amount.checked_sub(owned).filter(|n| *n > 0)?;
            let purchase = entry.with_amount(needed);
            if purchase.cost < min_lot_price {
                debug!(ticker = %entry.ticker, needed, cost = %purchase.cost, "difference below minimum lot price");
                return None;
            }
            Some(purchase)
        })
        .collect();

    diff.sort_by(|a, b| by_weight_desc(a.weight, &a.ticker, b.weight, &b.ticker));
    diff
}

//! Greedy packing of purchases into available cash.

use crate::allocation::AllocationEntry;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

/// Fits `entries` into `cash`, visiting them in the given order.
///
/// Each entry is capped at the number of whole shares the remaining cash can
/// buy and skipped when that is zero. Packing stops once the remaining cash is
/// below the cheapest price among the entries not yet visited. The summed cost
/// of the result never exceeds `cash`.
///
/// # Example
///
/// ```rust
/// use lotwise_adjust::allocation::AllocationEntry;
/// use lotwise_adjust::candidates::Candidate;
/// use lotwise_adjust::packer::pack;
/// use rust_decimal_macros::dec;
///
/// let wanted = AllocationEntry::from_candidate(&Candidate::new("A", dec!(30), dec!(100)), 5);
/// let packed = pack(&[wanted], dec!(100));
///
/// assert_eq!(packed[0].amount, 3);
/// assert_eq!(packed[0].cost, dec!(90));
/// ```
#[must_use]
pub fn pack(entries: &[AllocationEntry], cash: Decimal) -> Vec<AllocationEntry> {
    // cheapest[i] = min price over entries[i..]
    let mut cheapest = vec![Decimal::MAX; entries.len() + 1];
    for (i, entry) in entries.iter().enumerate().rev() {
        cheapest[i] = cheapest[i + 1].min(entry.price);
    }

    let mut remaining = cash;
    let mut packed = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        if remaining < cheapest[i] {
            debug!(%remaining, skipped = entries.len() - i, "cash below cheapest remaining price");
            break;
        }

        let affordable = (remaining / entry.price).floor().to_u64().unwrap_or(0);
        if affordable == 0 {
            continue;
        }

        let purchase = entry.with_amount(entry.amount.min(affordable));
        remaining -= purchase.cost;
        packed.push(purchase);
    }

    packed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::Candidate;
    use rust_decimal_macros::dec;

    fn entry(ticker: &str, price: Decimal, amount: u64) -> AllocationEntry {
        AllocationEntry::from_candidate(&Candidate::new(ticker, price, dec!(10)), amount)
    }

    fn spent(entries: &[AllocationEntry]) -> Decimal {
        entries.iter().map(|e| e.cost).sum()
    }

    #[test]
    fn test_everything_fits() {
        let entries = vec![entry("A", dec!(10), 3), entry("B", dec!(20), 2)];
        let packed = pack(&entries, dec!(1000));
        assert_eq!(packed, entries);
    }

    #[test]
    fn test_caps_amount() {
        let entries = vec![entry("A", dec!(10), 30)];
        let packed = pack(&entries, dec!(95));
        assert_eq!(packed[0].amount, 9);
        assert_eq!(packed[0].cost, dec!(90));
    }

    #[test]
    fn test_skips_unaffordable_then_buys_cheaper() {
        let entries = vec![
            entry("A", dec!(10), 5),
            entry("B", dec!(100), 1),
            entry("C", dec!(20), 1),
        ];
        let packed = pack(&entries, dec!(75));
        let tickers: Vec<&str> = packed.iter().map(|e| e.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["A", "C"]);
        assert_eq!(spent(&packed), dec!(70));
    }

    #[test]
    fn test_order_decides() {
        let entries = vec![entry("A", dec!(50), 2), entry("B", dec!(10), 5)];
        let packed = pack(&entries, dec!(100));
        assert_eq!(packed.len(), 1);
        assert_eq!(packed[0].ticker.as_str(), "A");
    }

    #[test]
    fn test_zero_cash() {
        let entries = vec![entry("A", dec!(10), 5)];
        assert!(pack(&entries, dec!(0)).is_empty());
        assert!(pack(&[], dec!(100)).is_empty());
    }

    #[test]
    fn test_fractional_prices() {
        let entries = vec![entry("A", dec!(33.33), 10)];
        let packed = pack(&entries, dec!(100));
        assert_eq!(packed[0].amount, 3);
        assert_eq!(packed[0].cost, dec!(99.99));
    }
}

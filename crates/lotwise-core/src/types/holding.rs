//! Existing portfolio positions.

use super::TickerId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A position already held in a portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker held.
    pub ticker: TickerId,

    /// Number of whole shares held.
    pub amount: u64,
}

impl Holding {
    /// Creates a new holding.
    pub fn new(ticker: impl Into<TickerId>, amount: u64) -> Self {
        Self {
            ticker: ticker.into(),
            amount,
        }
    }

    /// Market value at the given price.
    #[must_use]
    pub fn market_value(&self, price: Decimal) -> Decimal {
        Decimal::from(self.amount) * price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_market_value() {
        let h = Holding::new("T", 7);
        assert_eq!(h.market_value(dec!(12.25)), dec!(85.75));
    }

    #[test]
    fn test_zero_amount() {
        let h = Holding::new("T", 0);
        assert!(h.market_value(dec!(500)).is_zero());
    }
}

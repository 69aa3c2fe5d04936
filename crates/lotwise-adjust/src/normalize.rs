//! Weight normalization.
//!
//! Must be re-applied after every step that removes entries: weights that no
//! longer sum to 100 skew every allocation computed from them.

use rust_decimal::Decimal;

/// Rescales weights so they sum to 100.
///
/// Each weight becomes `w * (100 / sum(weights))`. Returns the input unchanged
/// when the sum is not positive, since there is nothing to scale against.
///
/// # Example
///
/// ```rust
/// use lotwise_adjust::normalize::normalize;
/// use rust_decimal_macros::dec;
///
/// let weights = normalize(&[dec!(3), dec!(1)]);
/// assert_eq!(weights, vec![dec!(75), dec!(25)]);
/// ```
#[must_use]
pub fn normalize(weights: &[Decimal]) -> Vec<Decimal> {
    let total: Decimal = weights.iter().sum();
    if total <= Decimal::ZERO {
        return weights.to_vec();
    }
    let coefficient = Decimal::ONE_HUNDRED / total;
    weights.iter().map(|w| w * coefficient).collect()
}

/// Normalizes the weights of any slice of items in place.
pub(crate) fn normalize_by<T>(items: &mut [T], weight: impl Fn(&mut T) -> &mut Decimal) {
    let mut items_iter: Vec<&mut Decimal> = items.iter_mut().map(weight).collect();
    let current: Vec<Decimal> = items_iter.iter().map(|w| **w).collect();
    for (slot, value) in items_iter.iter_mut().zip(normalize(&current)) {
        **slot = value;
    }
}

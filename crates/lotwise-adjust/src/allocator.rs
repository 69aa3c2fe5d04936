//! Whole-share lot allocation.
//!
//! Turns continuous target weights into integer share counts that spend a
//! budget as fully as possible without exceeding it.
//!
//! # Algorithm
//!
//! For a virtual spend `V`, each candidate receives
//! `round(weight / 100 * V / price)` shares, rounded half-up. Candidates whose
//! cost stays below the minimum lot price are dropped. Rounding loses or gains
//! cash, so allocating exactly the budget rarely spends exactly the budget.
//! The allocator therefore searches for the largest `V` whose allocation still
//! fits:
//!
//! 1. Starting at `V = budget`, grow `V` by `step` while the allocation fits,
//!    doubling `step` after every fitting move. If the allocation at the
//!    budget itself overshoots, search `[0, budget]`.
//! 2. Refine between the last fitting and the first overshooting `V` by
//!    bisection, snapping to the next rounding breakpoint whenever it lies in
//!    the upper half, until no breakpoint separates the two.
//! 3. Keep the positions of the last fitting `V` and renormalize their weights.
//!
//! The spent total is a non-decreasing step function of `V`, so the result is
//! the largest total reachable within the budget.

use crate::allocation::{Allocation, AllocationEntry};
use crate::candidates::CandidateSet;
use crate::config::AllocatorConfig;
use crate::error::{AdjustError, AdjustResult};
use crate::normalize::normalize_by;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info, warn};

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
const NUDGE: Decimal = Decimal::from_parts(1, 0, 0, false, 20);

/// Allocation evaluated at one virtual spend.
#[derive(Debug, Clone)]
struct Trial {
    virtual_spend: Decimal,
    amounts: Vec<u64>,
    /// `None` when the cost does not fit in a `Decimal`.
    total: Option<Decimal>,
}

impl Trial {
    fn fits(&self, budget: Decimal) -> bool {
        self.total.is_some_and(|total| total <= budget)
    }
}

/// Budget-search allocator.
///
/// # Example
///
/// ```rust
/// use lotwise_adjust::allocator::LotAllocator;
/// use lotwise_adjust::candidates::{Candidate, CandidateSet};
/// use lotwise_adjust::config::AllocatorConfig;
/// use rust_decimal_macros::dec;
///
/// let set = CandidateSet::new(vec![
///     Candidate::new("1", dec!(100), dec!(60)),
///     Candidate::new("2", dec!(50), dec!(40)),
/// ])
/// .unwrap();
///
/// let config = AllocatorConfig::new().with_min_lot_price(dec!(0));
/// let allocation = LotAllocator::new(&config).allocate(&set, dec!(1000)).unwrap();
///
/// assert_eq!(allocation.entries[0].amount, 6);
/// assert_eq!(allocation.entries[1].amount, 8);
/// assert!(allocation.total_cost <= dec!(1000));
/// ```
#[derive(Debug, Clone)]
pub struct LotAllocator<'a> {
    config: &'a AllocatorConfig,
}

impl<'a> LotAllocator<'a> {
    /// Creates an allocator using the given settings.
    #[must_use]
    pub fn new(config: &'a AllocatorConfig) -> Self {
        Self { config }
    }

    /// Allocates `budget` across the candidate set.
    ///
    /// An empty allocation is a valid outcome when no position clears the
    /// minimum lot price within the budget.
    ///
    /// # Errors
    ///
    /// `InvalidBudget` for a non-positive budget, `InvalidConfig` for unusable
    /// settings and `ConvergenceFailure` when the iteration bound is reached.
    pub fn allocate(&self, set: &CandidateSet, budget: Decimal) -> AdjustResult<Allocation> {
        if budget <= Decimal::ZERO {
            return Err(AdjustError::invalid_budget(budget));
        }
        self.config.validate()?;

        let mut step = self.config.step_for(budget);
        let mut iterations = 0usize;

        let at_budget = self.evaluate(set, budget);
        let (mut lo, mut hi) = if at_budget.fits(budget) {
            let mut lo = at_budget;
            loop {
                if lo.virtual_spend == Decimal::MAX {
                    break (lo, Decimal::MAX);
                }
                self.tick(&mut iterations)?;
                let spend = lo.virtual_spend.checked_add(step).unwrap_or(Decimal::MAX);
                let next = self.evaluate(set, spend);
                if !next.fits(budget) {
                    break (lo, next.virtual_spend);
                }
                lo = next;
                step = step.checked_mul(Decimal::TWO).unwrap_or(Decimal::MAX);
            }
        } else {
            debug!(%budget, total = ?at_budget.total, "allocation at budget overshoots, searching below");
            (self.evaluate(set, Decimal::ZERO), at_budget.virtual_spend)
        };

        debug!(
            lo = %lo.virtual_spend,
            hi = %hi,
            iterations,
            "bracketed virtual spend"
        );

        loop {
            let Some(next_break) = next_breakpoint(set, &lo) else {
                break;
            };
            if next_break >= hi {
                break;
            }
            self.tick(&mut iterations)?;

            let mid = lo.virtual_spend + (hi - lo.virtual_spend) / Decimal::TWO;
            let spend_at = if next_break >= mid { next_break } else { mid };
            if spend_at <= lo.virtual_spend || spend_at >= hi {
                break;
            }

            let trial = self.evaluate(set, spend_at);
            if trial.fits(budget) {
                lo = trial;
            } else {
                hi = trial.virtual_spend;
            }
        }

        let allocation = self.finish(set, &lo, budget);
        info!(
            %budget,
            virtual_spend = %allocation.virtual_spend,
            total_cost = %allocation.total_cost,
            positions = allocation.len(),
            iterations,
            "allocated lots"
        );
        Ok(allocation)
    }

    fn tick(&self, iterations: &mut usize) -> AdjustResult<()> {
        *iterations += 1;
        if *iterations > self.config.max_iterations {
            warn!(
                max_iterations = self.config.max_iterations,
                "budget search hit the iteration bound"
            );
            return Err(AdjustError::ConvergenceFailure {
                iterations: self.config.max_iterations,
            });
        }
        Ok(())
    }

    fn counts(&self, price: Decimal, amount: u64) -> bool {
        amount > 0
            && Decimal::from(amount)
                .checked_mul(price)
                .map_or(true, |cost| cost >= self.config.min_lot_price)
    }

    fn evaluate(&self, set: &CandidateSet, virtual_spend: Decimal) -> Trial {
        let amounts: Vec<u64> = set
            .iter()
            .map(|c| shares_at(c.weight, c.price, virtual_spend))
            .collect();
        let total = set
            .iter()
            .zip(&amounts)
            .filter(|(c, &amount)| self.counts(c.price, amount))
            .try_fold(Decimal::ZERO, |total, (c, &amount)| {
                Decimal::from(amount)
                    .checked_mul(c.price)
                    .and_then(|cost| total.checked_add(cost))
            });

        Trial {
            virtual_spend,
            amounts,
            total,
        }
    }

    fn finish(&self, set: &CandidateSet, trial: &Trial, budget: Decimal) -> Allocation {
        let mut entries: Vec<AllocationEntry> = set
            .iter()
            .zip(&trial.amounts)
            .filter(|(c, &amount)| {
                let keep = self.counts(c.price, amount);
                if !keep && amount > 0 {
                    debug!(ticker = %c.ticker, amount, "dropped position below minimum lot price");
                }
                keep
            })
            .map(|(c, &amount)| AllocationEntry::from_candidate(c, amount))
            .collect();

        normalize_by(&mut entries, |e| &mut e.weight);

        Allocation::new(entries, budget, trial.virtual_spend)
    }
}

/// Shares of one candidate at a virtual spend, rounded half-up.
///
/// Saturates at `u64::MAX` when the count is out of range.
fn shares_at(weight: Decimal, price: Decimal, virtual_spend: Decimal) -> u64 {
    (weight / Decimal::ONE_HUNDRED)
        .checked_mul(virtual_spend)
        .and_then(|value| value.checked_div(price))
        .and_then(|shares| {
            shares
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u64()
        })
        .unwrap_or(u64::MAX)
}

/// Smallest virtual spend above `trial` at which any share count changes.
fn next_breakpoint(set: &CandidateSet, trial: &Trial) -> Option<Decimal> {
    let current = trial.virtual_spend;
    set.iter()
        .zip(&trial.amounts)
        .filter_map(|(c, &amount)| {
            // out of range breakpoints are never reached
            let at = (Decimal::from(amount) + HALF)
                .checked_mul(Decimal::ONE_HUNDRED)?
                .checked_mul(c.price)?
                .checked_div(c.weight)?;
            // truncation can land the breakpoint on or just below the current spend
            if at > current {
                Some(at)
            } else {
                current.checked_add(current * NUDGE)
            }
        })
        .filter(|v| *v > current)
        .min()
}

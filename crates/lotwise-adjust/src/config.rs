//! Configuration for candidate filtering and lot allocation.

use crate::error::{AdjustError, AdjustResult};
use lotwise_core::TickerId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default minimum cost of a single position ("reasonable lot price").
pub const DEFAULT_MIN_LOT_PRICE: Decimal = dec!(202);

/// Default bound on budget-search iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Exclusion filters applied before allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustOptions {
    /// Countries to exclude.
    pub skip_countries: BTreeSet<String>,

    /// Sectors to exclude.
    pub skip_sectors: BTreeSet<String>,

    /// Industries to exclude.
    pub skip_industries: BTreeSet<String>,

    /// Specific tickers to exclude.
    pub skip_tickers: BTreeSet<TickerId>,

    /// Drop candidates whose PE exceeds this percentile (0-100) of the index.
    pub pe_quantile: Option<Decimal>,

    /// Drop candidates listed on an exchange that is not available.
    pub skip_unavailable_exchanges: bool,
}

impl Default for AdjustOptions {
    fn default() -> Self {
        Self {
            skip_countries: BTreeSet::new(),
            skip_sectors: BTreeSet::new(),
            skip_industries: BTreeSet::new(),
            skip_tickers: BTreeSet::new(),
            pe_quantile: None,
            skip_unavailable_exchanges: true,
        }
    }
}

impl AdjustOptions {
    /// Creates options that exclude nothing but unavailable exchanges.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a country to the denylist.
    #[must_use]
    pub fn skip_country(mut self, country: impl Into<String>) -> Self {
        self.skip_countries.insert(country.into());
        self
    }

    /// Adds a sector to the denylist.
    #[must_use]
    pub fn skip_sector(mut self, sector: impl Into<String>) -> Self {
        self.skip_sectors.insert(sector.into());
        self
    }

    /// Adds an industry to the denylist.
    #[must_use]
    pub fn skip_industry(mut self, industry: impl Into<String>) -> Self {
        self.skip_industries.insert(industry.into());
        self
    }

    /// Adds a ticker to the denylist.
    #[must_use]
    pub fn skip_ticker(mut self, ticker: impl Into<TickerId>) -> Self {
        self.skip_tickers.insert(ticker.into());
        self
    }

    /// Sets the PE percentile cutoff.
    #[must_use]
    pub fn with_pe_quantile(mut self, quantile: Decimal) -> Self {
        self.pe_quantile = Some(quantile);
        self
    }

    /// Sets whether unavailable exchanges are skipped.
    #[must_use]
    pub fn with_skip_unavailable_exchanges(mut self, skip: bool) -> Self {
        self.skip_unavailable_exchanges = skip;
        self
    }

    /// Checks that the PE quantile, if any, lies within 0..=100.
    pub fn validate(&self) -> AdjustResult<()> {
        if let Some(q) = self.pe_quantile {
            if q < Decimal::ZERO || q > Decimal::ONE_HUNDRED {
                return Err(AdjustError::invalid_quantile(q));
            }
        }
        Ok(())
    }
}

/// Settings of the lot allocator and the batch runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Positions costing less than this are dropped and their weight redistributed.
    pub min_lot_price: Decimal,

    /// Virtual-spend expansion step. `None` uses the budget itself.
    pub step: Option<Decimal>,

    /// Bound on search iterations before failing with `ConvergenceFailure`.
    pub max_iterations: usize,

    /// Enable parallel batch evaluation (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum batch size to trigger parallel evaluation.
    pub parallel_threshold: usize,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            min_lot_price: DEFAULT_MIN_LOT_PRICE,
            step: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            parallel: true,
            parallel_threshold: 8,
        }
    }
}

impl AllocatorConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always evaluates batches sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the minimum lot price.
    #[must_use]
    pub fn with_min_lot_price(mut self, min_lot_price: Decimal) -> Self {
        self.min_lot_price = min_lot_price;
        self
    }

    /// Sets a fixed expansion step.
    #[must_use]
    pub fn with_step(mut self, step: Decimal) -> Self {
        self.step = Some(step);
        self
    }

    /// Sets the iteration bound.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets whether to use parallel batch evaluation.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel batch evaluation.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Expansion step for the given budget.
    #[must_use]
    pub fn step_for(&self, budget: Decimal) -> Decimal {
        self.step.unwrap_or(budget)
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Rejects a negative lot price, a non-positive step or a zero iteration bound.
    pub fn validate(&self) -> AdjustResult<()> {
        if self.min_lot_price < Decimal::ZERO {
            return Err(AdjustError::invalid_config(format!(
                "min_lot_price must not be negative, got {}",
                self.min_lot_price
            )));
        }
        if let Some(step) = self.step {
            if step <= Decimal::ZERO {
                return Err(AdjustError::invalid_config(format!(
                    "step must be positive, got {step}"
                )));
            }
        }
        if self.max_iterations == 0 {
            return Err(AdjustError::invalid_config("max_iterations must be positive"));
        }
        Ok(())
    }
}

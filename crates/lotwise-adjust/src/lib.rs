//! # Lotwise Adjust
//!
//! Turns a weighted index into whole-share purchases for a given budget.
//!
//! An index gives every ticker a continuous target weight. Real portfolios
//! hold whole shares, and tiny positions are not worth trading. This crate
//! bridges the two:
//!
//! 1. [`CandidateSet::from_rows`] filters raw index rows and normalizes weights
//! 2. [`allocate`] searches for the share counts that spend the budget as
//!    fully as possible without exceeding it
//! 3. [`diff_and_pack`] compares a target with existing holdings and fits the
//!    missing shares into newly available cash
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: all inputs explicit, no I/O, no shared state
//! - **Decimal arithmetic**: prices, weights and costs never touch floats
//! - **No partial success**: every operation returns a complete result or an [`AdjustError`]
//! - **Config-driven parallelism**: optional rayon support for batches
//!
//! ## Quick Start
//!
//! ```rust
//! use lotwise_adjust::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let rows = vec![
//!     IndexRow::new("1", dec!(100), dec!(60)),
//!     IndexRow::new("2", dec!(50), dec!(40)),
//! ];
//! let config = AllocatorConfig::new().with_min_lot_price(dec!(0));
//!
//! let target = allocate_rows(&rows, &AdjustOptions::new(), dec!(1000), &config).unwrap();
//! assert_eq!(target.total_cost, dec!(1000));
//!
//! let holdings = vec![Holding::new("1", 4)];
//! let purchases = diff_and_pack(&target, &holdings, dec!(500), &config).unwrap();
//! assert!(purchases.total_cost <= dec!(500));
//! ```
//!
//! ## Module Overview
//!
//! - [`candidates`] - Filtering and validation of index rows
//! - [`normalize`] - Weight normalization
//! - [`allocator`] - Budget search producing whole-share lots
//! - [`diff`] - Target versus holdings
//! - [`packer`] - Greedy fit into available cash
//! - [`adjust`] - End-to-end entry points
//! - [`batch`] - Independent requests, optionally in parallel
//! - [`breakdown`] - Holdings and index constituents grouped by classification
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel batch evaluation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod adjust;
pub mod allocation;
pub mod allocator;
pub mod batch;
pub mod breakdown;
pub mod candidates;
pub mod config;
pub mod diff;
pub mod error;
pub mod normalize;
pub mod packer;

pub use error::{AdjustError, AdjustResult};

pub use adjust::{
    adjust_portfolio, allocate, allocate_rows, diff_and_pack, index_holdings_value,
    PortfolioAdjustment,
};
pub use allocation::{Allocation, AllocationEntry};
pub use allocator::LotAllocator;
pub use batch::{allocate_batch, AllocationRequest};
pub use breakdown::{
    breakdown, index_breakdown, Breakdown, Bucket, Dimension, IndexBreakdown, IndexBucket,
};
pub use candidates::{pe_threshold, Candidate, CandidateSet};
pub use config::{AdjustOptions, AllocatorConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_LOT_PRICE};
pub use diff::portfolio_diff;
pub use normalize::normalize;
pub use packer::pack;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::adjust::{
        adjust_portfolio, allocate, allocate_rows, diff_and_pack, PortfolioAdjustment,
    };
    pub use crate::allocation::{Allocation, AllocationEntry};
    pub use crate::batch::{allocate_batch, AllocationRequest};
    pub use crate::breakdown::{breakdown, index_breakdown, Breakdown, Dimension, IndexBreakdown};
    pub use crate::candidates::{Candidate, CandidateSet};
    pub use crate::config::{AdjustOptions, AllocatorConfig};
    pub use crate::error::{AdjustError, AdjustResult};
    pub use lotwise_core::prelude::*;
}

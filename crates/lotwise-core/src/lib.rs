//! # Lotwise Core
//!
//! Core domain types shared by the Lotwise crates.
//!
//! This crate provides the vocabulary exchanged between the allocation engine
//! and the collaborators that feed it:
//!
//! - **Identifiers**: [`TickerId`], an opaque, already-resolved ticker identity
//! - **Classification**: country / sector / industry attributes used for filtering
//! - **Index rows**: [`IndexRow`], one normalized (ticker, price, weight) row of an index
//! - **Holdings**: [`Holding`], an existing portfolio position
//!
//! ## Design Philosophy
//!
//! - **Decimal everywhere**: prices, weights and costs are `rust_decimal::Decimal`
//! - **Opaque identity**: ticker matching happens upstream, never here
//! - **Plain data**: no algorithms, no I/O
//!
//! ## Example
//!
//! ```rust
//! use lotwise_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let row = IndexRow::new("AAPL", dec!(189.50), dec!(6.8))
//!     .with_classification(Classification::new().with_sector("Technology"));
//! let holding = Holding::new("AAPL", 10);
//!
//! assert_eq!(holding.market_value(row.price), dec!(1895.00));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod types;

pub use types::{Classification, Holding, IndexRow, TickerId};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::types::{Classification, Holding, IndexRow, TickerId};
    pub use rust_decimal::Decimal;
}

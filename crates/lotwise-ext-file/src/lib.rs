//! # Lotwise Ext File
//!
//! File-based inputs for the Lotwise adjustment engine.
//!
//! This crate provides loaders for end-of-day snapshots and saved settings:
//! - CSV index snapshots ([`load_index`])
//! - CSV portfolio holdings ([`load_holdings`])
//! - TOML/JSON adjustment profiles ([`AdjustProfile`])
//!
//! Inputs are expected in normalized form. Ticker resolution against vendor
//! identifiers happens before the files are written.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod holdings;
mod index;
mod profile;

pub use error::{FileError, FileResult};
pub use holdings::load_holdings;
pub use index::load_index;
pub use profile::AdjustProfile;

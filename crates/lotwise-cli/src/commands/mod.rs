//! CLI command implementations.

pub mod adjust;
pub mod allocate;
pub mod breakdown;

pub use adjust::AdjustArgs;
pub use allocate::AllocateArgs;
pub use breakdown::BreakdownArgs;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::Args;
use lotwise_adjust::{AdjustOptions, AllocatorConfig};
use lotwise_core::TickerId;
use lotwise_ext_file::AdjustProfile;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Filter and allocator flags shared by `allocate` and `adjust`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Profile file (.toml or .json) with [options] and [allocator] tables
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Minimum cost of a single position
    #[arg(long, value_parser = parse_non_negative)]
    pub min_lot: Option<Decimal>,

    /// Virtual-spend expansion step (defaults to the budget)
    #[arg(long, value_parser = parse_positive)]
    pub step: Option<Decimal>,

    /// Exclude a country (repeatable)
    #[arg(long = "skip-country", value_name = "COUNTRY")]
    pub skip_countries: Vec<String>,

    /// Exclude a sector (repeatable)
    #[arg(long = "skip-sector", value_name = "SECTOR")]
    pub skip_sectors: Vec<String>,

    /// Exclude an industry (repeatable)
    #[arg(long = "skip-industry", value_name = "INDUSTRY")]
    pub skip_industries: Vec<String>,

    /// Exclude a ticker (repeatable)
    #[arg(long = "skip-ticker", value_name = "TICKER")]
    pub skip_tickers: Vec<String>,

    /// Drop tickers whose PE is above this percentile (0-100) of the index
    #[arg(long, value_parser = parse_percent)]
    pub pe_quantile: Option<Decimal>,

    /// Keep tickers listed on unavailable exchanges
    #[arg(long)]
    pub include_unavailable: bool,
}

impl FilterArgs {
    /// Profile settings with the command-line flags applied on top.
    pub fn settings(&self) -> Result<(AdjustOptions, AllocatorConfig)> {
        let profile = match &self.profile {
            Some(path) => AdjustProfile::from_file(path)?,
            None => AdjustProfile::default(),
        };
        let AdjustProfile {
            mut options,
            mut allocator,
        } = profile;

        options.skip_countries.extend(self.skip_countries.iter().cloned());
        options.skip_sectors.extend(self.skip_sectors.iter().cloned());
        options.skip_industries.extend(self.skip_industries.iter().cloned());
        options
            .skip_tickers
            .extend(self.skip_tickers.iter().map(|t| TickerId::from(t.as_str())));
        if let Some(q) = self.pe_quantile {
            options.pe_quantile = Some(q);
        }
        if self.include_unavailable {
            options.skip_unavailable_exchanges = false;
        }

        if let Some(min_lot) = self.min_lot {
            allocator.min_lot_price = min_lot;
        }
        if let Some(step) = self.step {
            allocator.step = Some(step);
        }

        debug!(?options, ?allocator, "resolved adjustment settings");
        Ok((options, allocator))
    }
}

/// Parses a decimal argument.
pub fn parse_decimal(s: &str) -> CliResult<Decimal> {
    Decimal::from_str(s.trim()).map_err(|_| CliError::InvalidDecimal(s.to_string()))
}

/// Parses a strictly positive decimal argument.
pub fn parse_positive(s: &str) -> CliResult<Decimal> {
    let value = parse_decimal(s)?;
    if value <= Decimal::ZERO {
        return Err(CliError::OutOfRange {
            name: "amount",
            value: s.to_string(),
            expected: "Must be positive.",
        });
    }
    Ok(value)
}

/// Parses a decimal argument that may be zero.
pub fn parse_non_negative(s: &str) -> CliResult<Decimal> {
    let value = parse_decimal(s)?;
    if value < Decimal::ZERO {
        return Err(CliError::OutOfRange {
            name: "amount",
            value: s.to_string(),
            expected: "Must not be negative.",
        });
    }
    Ok(value)
}

/// Parses a percentile between 0 and 100.
pub fn parse_percent(s: &str) -> CliResult<Decimal> {
    let value = parse_decimal(s)?;
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(CliError::OutOfRange {
            name: "percentile",
            value: s.to_string(),
            expected: "Must be between 0 and 100.",
        });
    }
    Ok(value)
}

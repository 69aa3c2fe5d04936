//! Adjustment profiles.
//!
//! A profile bundles the filters and allocator settings used for a portfolio,
//! so a recurring adjustment does not need them repeated on every call:
//!
//! ```toml
//! [options]
//! skip_countries = ["China"]
//! skip_sectors = ["Energy"]
//! pe_quantile = 90
//!
//! [allocator]
//! min_lot_price = 202
//! max_iterations = 10000
//! ```

use std::path::Path;

use lotwise_adjust::{AdjustOptions, AllocatorConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FileError, FileResult};

/// Filters and allocator settings loaded from a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustProfile {
    /// Candidate filters.
    pub options: AdjustOptions,

    /// Allocator settings.
    pub allocator: AllocatorConfig,
}

impl AdjustProfile {
    /// Loads a profile, choosing the format by extension (`.toml` or `.json`).
    pub fn from_file(path: impl AsRef<Path>) -> FileResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| FileError::io(path, e))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let profile = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err("unsupported profile format (expected .toml or .json)".to_string()),
        }
        .map_err(|message| FileError::parse(path, message))?;

        profile
            .validate()
            .map_err(|message| FileError::parse(path, message))?;

        debug!(path = %path.display(), "loaded profile");
        Ok(profile)
    }

    /// Parses a TOML profile.
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Parses a JSON profile.
    pub fn from_json_str(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    /// Checks both halves of the profile.
    pub fn validate(&self) -> Result<(), String> {
        self.options.validate().map_err(|e| e.to_string())?;
        self.allocator.validate().map_err(|e| e.to_string())
    }
}

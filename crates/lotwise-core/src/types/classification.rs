//! Ticker classification attributes.

use serde::{Deserialize, Serialize};

/// Label used when a classification attribute is not known.
pub(crate) const UNKNOWN: &str = "Unknown";

/// Country, sector and industry of a ticker.
///
/// The values are opaque strings as delivered by the data provider. They are
/// only compared for equality against exclusion lists and used as bucket keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    /// Country of domicile.
    #[serde(default)]
    pub country: Option<String>,

    /// Sector (e.g., "Technology", "Energy").
    #[serde(default)]
    pub sector: Option<String>,

    /// Industry within the sector.
    #[serde(default)]
    pub industry: Option<String>,
}

impl Classification {
    /// Creates an empty classification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets the sector.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Sets the industry.
    #[must_use]
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Country, or `"Unknown"`.
    #[must_use]
    pub fn country_or_unknown(&self) -> &str {
        self.country.as_deref().unwrap_or(UNKNOWN)
    }

    /// Sector, or `"Unknown"`.
    #[must_use]
    pub fn sector_or_unknown(&self) -> &str {
        self.sector.as_deref().unwrap_or(UNKNOWN)
    }

    /// Industry, or `"Unknown"`.
    #[must_use]
    pub fn industry_or_unknown(&self) -> &str {
        self.industry.as_deref().unwrap_or(UNKNOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let c = Classification::new()
            .with_country("United States")
            .with_sector("Energy")
            .with_industry("Oil & Gas");

        assert_eq!(c.country.as_deref(), Some("United States"));
        assert_eq!(c.sector.as_deref(), Some("Energy"));
        assert_eq!(c.industry.as_deref(), Some("Oil & Gas"));
    }

    #[test]
    fn test_unknown_fallback() {
        let c = Classification::new().with_sector("Utilities");
        assert_eq!(c.country_or_unknown(), "Unknown");
        assert_eq!(c.sector_or_unknown(), "Utilities");
        assert_eq!(c.industry_or_unknown(), "Unknown");
    }
}

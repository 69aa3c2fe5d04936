//! Portfolio and index breakdown by classification.
//!
//! [`breakdown`] groups holdings by country, sector or industry and reports the
//! market value and weight of each group. [`index_breakdown`] reports how an
//! index's constituents spread over the same groups.

use lotwise_core::{Holding, IndexRow, TickerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Classification attribute to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Country of the issuer.
    Country,
    /// Sector.
    Sector,
    /// Industry.
    Industry,
}

impl Dimension {
    /// Bucket name of a row under this dimension.
    #[must_use]
    pub fn key<'a>(&self, row: &'a IndexRow) -> &'a str {
        match self {
            Self::Country => row.classification.country_or_unknown(),
            Self::Sector => row.classification.sector_or_unknown(),
            Self::Industry => row.classification.industry_or_unknown(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Country => "country",
            Self::Sector => "sector",
            Self::Industry => "industry",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "country" => Ok(Self::Country),
            "sector" => Ok(Self::Sector),
            "industry" => Ok(Self::Industry),
            other => Err(format!("unknown breakdown dimension: {other}")),
        }
    }
}

/// Aggregated holdings of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Group name, `"Unknown"` when unclassified.
    pub name: String,

    /// Number of holdings in the group.
    pub count: usize,

    /// Market value at index prices.
    pub market_value: Decimal,

    /// Share of the total market value, in percent.
    pub weight: Decimal,
}

/// Holdings grouped along one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Dimension grouped by.
    pub dimension: Dimension,

    /// Groups by descending market value, ties by name.
    pub buckets: Vec<Bucket>,

    /// Total market value of the priced holdings.
    pub total_market_value: Decimal,

    /// Holdings with no matching index row, left out of the totals.
    pub unpriced: Vec<TickerId>,
}

impl Breakdown {
    /// Looks up a group by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.name == name)
    }
}

/// Groups `holdings` along `dimension`, valued at the prices in `rows`.
#[must_use]
pub fn breakdown(rows: &[IndexRow], holdings: &[Holding], dimension: Dimension) -> Breakdown {
    let by_ticker: HashMap<&TickerId, &IndexRow> = rows.iter().map(|r| (&r.ticker, r)).collect();

    let mut grouped: HashMap<&str, (usize, Decimal)> = HashMap::new();
    let mut unpriced = Vec::new();
    for holding in holdings {
        match by_ticker.get(&holding.ticker) {
            Some(row) => {
                let slot = grouped.entry(dimension.key(row)).or_default();
                slot.0 += 1;
                slot.1 += holding.market_value(row.price);
            }
            None => unpriced.push(holding.ticker.clone()),
        }
    }
    if !unpriced.is_empty() {
        debug!(count = unpriced.len(), "holdings without index price");
    }

    let total_market_value: Decimal = grouped.values().map(|(_, value)| *value).sum();

    let mut buckets: Vec<Bucket> = grouped
        .into_iter()
        .map(|(name, (count, market_value))| {
            let weight = if total_market_value.is_zero() {
                Decimal::ZERO
            } else {
                market_value / total_market_value * Decimal::ONE_HUNDRED
            };
            Bucket {
                name: name.to_string(),
                count,
                market_value,
                weight,
            }
        })
        .collect();
    buckets.sort_by(|a, b| {
        b.market_value
            .cmp(&a.market_value)
            .then_with(|| a.name.cmp(&b.name))
    });

    Breakdown {
        dimension,
        buckets,
        total_market_value,
        unpriced,
    }
}

/// Constituents of one group of an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexBucket {
    /// Group name, `"Unknown"` when unclassified.
    pub name: String,

    /// Number of constituents in the group.
    pub count: usize,

    /// Share of the constituents in the group, in percent.
    pub share: Decimal,

    /// Summed index weight of the group, in percent of the total weight.
    pub index_weight: Decimal,
}

/// Composition of an index along one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexBreakdown {
    /// Dimension grouped by.
    pub dimension: Dimension,

    /// Groups by descending constituent count, ties by name.
    pub buckets: Vec<IndexBucket>,

    /// Number of constituents.
    pub constituents: usize,
}

impl IndexBreakdown {
    /// Looks up a group by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&IndexBucket> {
        self.buckets.iter().find(|b| b.name == name)
    }
}

/// Groups the constituents in `rows` along `dimension`.
///
/// `share` counts constituents, so every row weighs the same regardless of its
/// index weight. `index_weight` carries the weight-based view alongside.
#[must_use]
pub fn index_breakdown(rows: &[IndexRow], dimension: Dimension) -> IndexBreakdown {
    let mut grouped: HashMap<&str, (usize, Decimal)> = HashMap::new();
    for row in rows {
        let slot = grouped.entry(dimension.key(row)).or_default();
        slot.0 += 1;
        slot.1 += row.weight;
    }

    let constituents = rows.len();
    let total_weight: Decimal = grouped.values().map(|(_, weight)| *weight).sum();

    let mut buckets: Vec<IndexBucket> = grouped
        .into_iter()
        .map(|(name, (count, weight))| IndexBucket {
            name: name.to_string(),
            count,
            share: Decimal::from(count) / Decimal::from(constituents) * Decimal::ONE_HUNDRED,
            index_weight: if total_weight.is_zero() {
                Decimal::ZERO
            } else {
                weight / total_weight * Decimal::ONE_HUNDRED
            },
        })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    IndexBreakdown {
        dimension,
        buckets,
        constituents,
    }
}

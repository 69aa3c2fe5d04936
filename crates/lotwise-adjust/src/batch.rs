//! Independent allocation requests evaluated together.
//!
//! Requests share nothing, so they run in parallel with rayon when the
//! `parallel` feature is enabled and the batch is large enough.

use crate::adjust::allocate_rows;
use crate::allocation::Allocation;
use crate::config::{AdjustOptions, AllocatorConfig};
use crate::error::AdjustResult;
use lotwise_core::IndexRow;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One allocation to compute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Raw index rows.
    pub rows: Vec<IndexRow>,

    /// Filters to apply to the rows.
    #[serde(default)]
    pub options: AdjustOptions,

    /// Cash to allocate.
    pub budget: Decimal,
}

impl AllocationRequest {
    /// Creates a request with default filters.
    #[must_use]
    pub fn new(rows: Vec<IndexRow>, budget: Decimal) -> Self {
        Self {
            rows,
            options: AdjustOptions::default(),
            budget,
        }
    }

    /// Sets the filters.
    #[must_use]
    pub fn with_options(mut self, options: AdjustOptions) -> Self {
        self.options = options;
        self
    }
}

/// Evaluates every request, returning one result per request in input order.
///
/// A failing request does not affect the others.
pub fn allocate_batch(
    requests: &[AllocationRequest],
    config: &AllocatorConfig,
) -> Vec<AdjustResult<Allocation>> {
    debug!(
        requests = requests.len(),
        parallel = config.should_parallelize(requests.len()),
        "allocating batch"
    );
    maybe_parallel_map(requests, config, |request| {
        allocate_rows(&request.rows, &request.options, request.budget, config)
    })
}

/// Maps a function over items, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The collection size reaches `config.parallel_threshold`
#[allow(unused_variables)]
pub(crate) fn maybe_parallel_map<T, U, F>(items: &[T], config: &AllocatorConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdjustError;
    use rust_decimal_macros::dec;

    fn rows() -> Vec<IndexRow> {
        vec![
            IndexRow::new("1", dec!(100), dec!(60)),
            IndexRow::new("2", dec!(50), dec!(40)),
        ]
    }

    #[test]
    fn test_maybe_parallel_map_keeps_order() {
        let config = AllocatorConfig::new().with_threshold(2);
        let items: Vec<u32> = (0..50).collect();
        let doubled = maybe_parallel_map(&items, &config, |x| x * 2);
        assert_eq!(doubled, (0..50).map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_batch_results_in_order() {
        let config = AllocatorConfig::sequential().with_min_lot_price(dec!(0));
        let requests = vec![
            AllocationRequest::new(rows(), dec!(1000)),
            AllocationRequest::new(rows(), dec!(0)),
            AllocationRequest::new(rows(), dec!(40)),
        ];

        let results = allocate_batch(&requests, &config);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().map(|a| a.total_cost), Ok(dec!(1000)));
        assert_eq!(results[1], Err(AdjustError::invalid_budget(dec!(0))));
        assert!(results[2].as_ref().is_ok_and(Allocation::is_empty));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let requests: Vec<AllocationRequest> = (1..=20)
            .map(|i| AllocationRequest::new(rows(), Decimal::from(i * 137)))
            .collect();

        let sequential = allocate_batch(&requests, &AllocatorConfig::sequential());
        let parallel = allocate_batch(&requests, &AllocatorConfig::new().with_threshold(4));
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_request_options() {
        let config = AllocatorConfig::sequential().with_min_lot_price(dec!(0));
        let request = AllocationRequest::new(rows(), dec!(1000))
            .with_options(AdjustOptions::new().skip_ticker("1"));

        let results = allocate_batch(&[request], &config);
        let allocation = results[0].as_ref().unwrap();
        assert_eq!(allocation.len(), 1);
        assert_eq!(allocation.entries[0].ticker.as_str(), "2");
    }
}

//! Integration tests for lotwise-adjust.
//!
//! These tests run whole requests through filtering, allocation, diffing and
//! packing with realistic index snapshots.

use lotwise_adjust::prelude::*;
use lotwise_adjust::{pe_threshold, DEFAULT_MIN_LOT_PRICE};
use rust_decimal_macros::dec;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn row(
    ticker: &str,
    price: Decimal,
    weight: Decimal,
    country: &str,
    sector: &str,
    pe: Option<Decimal>,
) -> IndexRow {
    let row = IndexRow::new(ticker, price, weight)
        .with_symbol(ticker)
        .with_classification(
            Classification::new()
                .with_country(country)
                .with_sector(sector)
                .with_industry(format!("{sector} Industry")),
        );
    match pe {
        Some(pe) => row.with_pe(pe),
        None => row,
    }
}

/// A small large-cap index with mixed sectors and countries.
fn large_cap_index() -> Vec<IndexRow> {
    vec![
        row("AAPL", dec!(189.50), dec!(7.1), "United States", "Technology", Some(dec!(29.4))),
        row("MSFT", dec!(415.20), dec!(6.9), "United States", "Technology", Some(dec!(35.1))),
        row("NVDA", dec!(880.10), dec!(5.2), "United States", "Technology", Some(dec!(71.8))),
        row("AMZN", dec!(178.30), dec!(3.7), "United States", "Consumer Cyclical", Some(dec!(60.2))),
        row("XOM", dec!(112.40), dec!(1.2), "United States", "Energy", Some(dec!(13.0))),
        row("CVX", dec!(155.70), dec!(0.9), "United States", "Energy", Some(dec!(14.6))),
        row("JPM", dec!(198.00), dec!(1.3), "United States", "Financial Services", Some(dec!(11.9))),
        row("TSM", dec!(140.60), dec!(0.8), "Taiwan", "Technology", Some(dec!(25.3))),
        row("BABA", dec!(72.10), dec!(0.4), "China", "Consumer Cyclical", Some(dec!(15.2))),
        row("KO", dec!(60.20), dec!(0.6), "United States", "Consumer Defensive", Some(dec!(24.1))),
    ]
}

fn no_lot_floor() -> AllocatorConfig {
    AllocatorConfig::new().with_min_lot_price(dec!(0))
}

fn spent(allocation: &Allocation) -> Decimal {
    allocation.entries.iter().map(|e| e.cost).sum()
}

// =============================================================================
// ALLOCATION SCENARIOS
// =============================================================================

#[test]
fn test_two_ticker_exact_split() {
    let rows = vec![
        IndexRow::new("1", dec!(100), dec!(60)),
        IndexRow::new("2", dec!(50), dec!(40)),
    ];
    let allocation = allocate_rows(&rows, &AdjustOptions::new(), dec!(1000), &no_lot_floor()).unwrap();

    assert_eq!(allocation.get(&TickerId::from("1")).map(|e| e.amount), Some(6));
    assert_eq!(allocation.get(&TickerId::from("1")).map(|e| e.cost), Some(dec!(600)));
    assert_eq!(allocation.get(&TickerId::from("2")).map(|e| e.amount), Some(8));
    assert_eq!(allocation.get(&TickerId::from("2")).map(|e| e.cost), Some(dec!(400)));
    assert!(allocation.total_cost <= dec!(1000));
}

#[test]
fn test_budget_below_any_share_is_empty() {
    let rows = vec![
        IndexRow::new("1", dec!(100), dec!(60)),
        IndexRow::new("2", dec!(50), dec!(40)),
    ];
    let allocation = allocate_rows(&rows, &AdjustOptions::new(), dec!(40), &no_lot_floor()).unwrap();

    assert!(allocation.is_empty());
    assert_eq!(allocation.total_cost, dec!(0));
}

#[test]
fn test_only_energy_filtered_out() {
    let rows = vec![
        row("XOM", dec!(112.40), dec!(60), "United States", "Energy", None),
        row("CVX", dec!(155.70), dec!(40), "United States", "Energy", None),
    ];
    let options = AdjustOptions::new().skip_sector("Energy");

    let result = allocate_rows(&rows, &options, dec!(10_000), &AllocatorConfig::default());
    assert_eq!(result, Err(AdjustError::EmptyCandidateSet));
}

#[test]
fn test_large_cap_default_lot_price() {
    let config = AllocatorConfig::default();
    let allocation =
        allocate_rows(&large_cap_index(), &AdjustOptions::new(), dec!(25_000), &config).unwrap();

    assert!(!allocation.is_empty());
    assert!(allocation.total_cost <= dec!(25_000));
    assert_eq!(allocation.total_cost, spent(&allocation));
    for entry in allocation.iter() {
        assert!(entry.amount > 0);
        assert!(entry.cost >= DEFAULT_MIN_LOT_PRICE, "{} below lot price", entry.ticker);
    }

    let total_weight: Decimal = allocation.iter().map(|e| e.weight).sum();
    assert!((total_weight - dec!(100)).abs() < dec!(0.000001));
}

#[test]
fn test_entries_sorted_by_weight() {
    let allocation = allocate_rows(
        &large_cap_index(),
        &AdjustOptions::new(),
        dec!(100_000),
        &AllocatorConfig::default(),
    )
    .unwrap();

    let weights: Vec<Decimal> = allocation.iter().map(|e| e.weight).collect();
    assert!(weights.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(allocation.entries[0].ticker.as_str(), "AAPL");
}

#[test]
fn test_filters_combined() {
    let options = AdjustOptions::new()
        .skip_country("China")
        .skip_sector("Energy")
        .skip_ticker("NVDA");
    let allocation =
        allocate_rows(&large_cap_index(), &options, dec!(50_000), &no_lot_floor()).unwrap();

    for skipped in ["BABA", "XOM", "CVX", "NVDA"] {
        assert!(allocation.get(&TickerId::from(skipped)).is_none(), "{skipped} kept");
    }
    assert!(allocation.get(&TickerId::from("AAPL")).is_some());
}

#[test]
fn test_pe_quantile_filter() {
    let rows = large_cap_index();
    let cutoff = pe_threshold(&rows, dec!(50)).unwrap().unwrap();
    let options = AdjustOptions::new().with_pe_quantile(dec!(50));

    let candidates = CandidateSet::from_rows(&rows, &options).unwrap();
    assert_eq!(candidates.len(), 5);
    for candidate in candidates.iter() {
        let pe = rows
            .iter()
            .find(|r| r.ticker == candidate.ticker)
            .and_then(|r| r.pe)
            .unwrap();
        assert!(pe <= cutoff);
    }
}

#[test]
fn test_unavailable_exchange_skipped() {
    let mut rows = large_cap_index();
    rows[0] = rows[0].clone().with_exchange_available(false);

    let candidates = CandidateSet::from_rows(&rows, &AdjustOptions::new()).unwrap();
    assert!(candidates.get(&TickerId::from("AAPL")).is_none());

    let keep_all = AdjustOptions::new().with_skip_unavailable_exchanges(false);
    let candidates = CandidateSet::from_rows(&rows, &keep_all).unwrap();
    assert!(candidates.get(&TickerId::from("AAPL")).is_some());
}

#[test]
fn test_invalid_rows_rejected() {
    let mut rows = large_cap_index();
    rows.push(IndexRow::new("BAD", dec!(0), dec!(1)));
    let result = allocate_rows(&rows, &AdjustOptions::new(), dec!(1000), &no_lot_floor());
    assert!(matches!(result, Err(AdjustError::NonPositivePrice { .. })));

    let mut rows = large_cap_index();
    rows.push(rows[0].clone());
    let result = allocate_rows(&rows, &AdjustOptions::new(), dec!(1000), &no_lot_floor());
    assert!(matches!(result, Err(AdjustError::DuplicateTicker { .. })));
}

#[test]
fn test_allocate_is_deterministic() {
    let rows = large_cap_index();
    let config = AllocatorConfig::default();
    let first = allocate_rows(&rows, &AdjustOptions::new(), dec!(33_333.33), &config).unwrap();
    let second = allocate_rows(&rows, &AdjustOptions::new(), dec!(33_333.33), &config).unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// DIFF AND PACK
// =============================================================================

#[test]
fn test_diff_partial_holding() {
    let candidates = CandidateSet::new(vec![Candidate::new("1", dec!(20), dec!(100))]).unwrap();
    let target = allocate(&candidates, dec!(200), &no_lot_floor()).unwrap();
    assert_eq!(target.entries[0].amount, 10);

    let holdings = vec![Holding::new("1", 7)];
    let purchases = diff_and_pack(&target, &holdings, dec!(60), &no_lot_floor()).unwrap();

    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases.entries[0].amount, 3);
}

#[test]
fn test_pack_respects_top_up() {
    let rows = large_cap_index();
    let config = AllocatorConfig::default();
    let target = allocate_rows(&rows, &AdjustOptions::new(), dec!(60_000), &config).unwrap();

    let holdings = vec![Holding::new("AAPL", 20), Holding::new("MSFT", 3)];
    let purchases = diff_and_pack(&target, &holdings, dec!(5_000), &config).unwrap();

    assert!(purchases.total_cost <= dec!(5_000));
    assert!(purchases.iter().all(|e| e.amount > 0));
    for entry in purchases.iter() {
        let wanted = target.get(&entry.ticker).map(|e| e.amount).unwrap_or(0);
        assert!(entry.amount <= wanted);
    }
}

#[test]
fn test_adjust_existing_portfolio() {
    let rows = large_cap_index();
    let holdings = vec![
        Holding::new("AAPL", 10),
        Holding::new("MSFT", 5),
        Holding::new("DELISTED", 40),
    ];
    let config = AllocatorConfig::default();

    let result =
        adjust_portfolio(&rows, &AdjustOptions::new(), &holdings, dec!(10_000), &config).unwrap();

    assert_eq!(result.holdings_value, dec!(1895.00) + dec!(2076.00));
    assert_eq!(result.target.budget, result.holdings_value + dec!(10_000));
    assert!(result.spent() <= dec!(10_000));
    assert_eq!(result.remaining_cash(), dec!(10_000) - result.spent());
    assert!(result.purchases.get(&TickerId::from("DELISTED")).is_none());
}

#[test]
fn test_adjust_rejects_non_positive_top_up() {
    let result = adjust_portfolio(
        &large_cap_index(),
        &AdjustOptions::new(),
        &[],
        dec!(0),
        &AllocatorConfig::default(),
    );
    assert!(matches!(result, Err(AdjustError::InvalidBudget { .. })));
}

// =============================================================================
// BREAKDOWN AND BATCH
// =============================================================================

#[test]
fn test_breakdown_of_allocation() {
    let rows = large_cap_index();
    let allocation =
        allocate_rows(&rows, &AdjustOptions::new(), dec!(100_000), &AllocatorConfig::default())
            .unwrap();
    let holdings: Vec<Holding> = allocation
        .iter()
        .map(|e| Holding::new(e.ticker.clone(), e.amount))
        .collect();

    let by_sector = breakdown(&rows, &holdings, Dimension::Sector);
    assert_eq!(by_sector.total_market_value, allocation.total_cost);
    assert_eq!(by_sector.buckets[0].name, "Technology");

    let total_weight: Decimal = by_sector.buckets.iter().map(|b| b.weight).sum();
    assert!((total_weight - dec!(100)).abs() < dec!(0.000001));
}

#[test]
fn test_batch_matches_single_requests() {
    let config = AllocatorConfig::default().with_threshold(2);
    let requests: Vec<AllocationRequest> = [dec!(5_000), dec!(20_000), dec!(80_000)]
        .into_iter()
        .map(|budget| AllocationRequest::new(large_cap_index(), budget))
        .collect();

    let results = allocate_batch(&requests, &config);
    for (request, result) in requests.iter().zip(&results) {
        let single = allocate_rows(&request.rows, &request.options, request.budget, &config);
        assert_eq!(result, &single);
    }
}

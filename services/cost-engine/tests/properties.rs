//! Cross-module property tests for the cost pipeline
//!
//! Validates the arithmetic identities and degradation behavior that
//! must hold for any book and any configuration, not just the worked
//! examples in the unit tests.

use proptest::prelude::*;
use rust_decimal::Decimal;

use cost_engine::config::EngineConfig;
use cost_engine::models::slippage::walk_asks;
use cost_engine::pipeline::CostPipeline;
use cost_engine::trend::{TrendHistory, TREND_CAPACITY};
use types::book::{BookLevel, OrderBookSnapshot};
use types::estimate::{CostEstimate, EstimateId};
use types::numeric::{Price, Quantity};

/// Raw levels: price in cents, size in hundredths of a unit.
fn raw_levels() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((1u32..10_000_000, 1u32..100_000), 0..12)
}

fn to_levels(raw: Vec<(u32, u32)>, ascending: bool) -> Vec<BookLevel> {
    let mut prices: Vec<(u32, u32)> = raw;
    prices.sort_by_key(|(p, _)| *p);
    if !ascending {
        prices.reverse();
    }
    prices
        .into_iter()
        .map(|(p, s)| {
            BookLevel::new(
                Price::try_new(Decimal::new(p as i64, 2)).unwrap(),
                Quantity::try_new(Decimal::new(s as i64, 2)).unwrap(),
            )
        })
        .collect()
}

fn book(asks: Vec<(u32, u32)>, bids: Vec<(u32, u32)>) -> OrderBookSnapshot {
    OrderBookSnapshot {
        symbol: "BTC-USDT".to_string(),
        bids: to_levels(bids, false),
        asks: to_levels(asks, true),
        captured_at: 0,
    }
}

fn pipeline(quantity: u32) -> CostPipeline {
    CostPipeline::new(EngineConfig {
        quantity_usd: Decimal::from(quantity),
        ..EngineConfig::default()
    })
}

fn blank_estimate(marker: i64) -> CostEstimate {
    CostEstimate {
        id: EstimateId::new(),
        slippage: Decimal::ZERO,
        fees: Decimal::ZERO,
        market_impact: Decimal::ZERO,
        net_cost: Decimal::ZERO,
        net_cost_usd: Decimal::ZERO,
        maker_fraction: Decimal::ZERO,
        taker_fraction: Decimal::ONE,
        latency_ms: 0.0,
        timestamp: marker,
    }
}

proptest! {
    #[test]
    fn net_cost_identity_holds(
        asks in raw_levels(),
        bids in raw_levels(),
        quantity in 1u32..1_000_000,
    ) {
        let est = pipeline(quantity).compute_tick(&book(asks, bids));
        prop_assert_eq!(est.net_cost, est.slippage + est.fees + est.market_impact);
    }

    #[test]
    fn maker_taker_fractions_sum_to_one(
        asks in raw_levels(),
        bids in raw_levels(),
        quantity in 1u32..1_000_000,
    ) {
        let est = pipeline(quantity).compute_tick(&book(asks, bids));
        prop_assert_eq!(est.maker_fraction + est.taker_fraction, Decimal::ONE);
    }

    #[test]
    fn empty_ask_side_degrades_to_zero(
        bids in raw_levels(),
        quantity in 1u32..1_000_000,
    ) {
        let est = pipeline(quantity).compute_tick(&book(Vec::new(), bids));
        prop_assert_eq!(est.slippage, Decimal::ZERO);
        prop_assert_eq!(est.market_impact, Decimal::ZERO);
        prop_assert_eq!(est.net_cost, est.fees);
    }

    #[test]
    fn empty_bid_side_degrades_to_zero(
        asks in raw_levels(),
        quantity in 1u32..1_000_000,
    ) {
        let est = pipeline(quantity).compute_tick(&book(asks, Vec::new()));
        prop_assert_eq!(est.slippage, Decimal::ZERO);
        prop_assert_eq!(est.market_impact, Decimal::ZERO);
    }

    #[test]
    fn depth_walk_never_overfills(
        asks in raw_levels(),
        quantity in 1u32..1_000_000,
    ) {
        let levels = to_levels(asks, true);
        let target = Decimal::from(quantity);
        let walk = walk_asks(&levels, target);

        prop_assert!(walk.filled_notional <= target);
        prop_assert!(walk.cost >= Decimal::ZERO);
        if walk.exhausted {
            // Exhausted means the whole book was consumed
            let total: Decimal = levels.iter().map(|l| l.notional()).sum();
            prop_assert_eq!(walk.filled_notional, total);
        } else {
            prop_assert_eq!(walk.filled_notional, target);
        }
    }

    #[test]
    fn trend_history_is_bounded(appends in 0usize..300) {
        let mut trend = TrendHistory::new();
        for i in 0..appends {
            trend.append(blank_estimate(i as i64));
        }
        prop_assert!(trend.len() <= TREND_CAPACITY);
        prop_assert_eq!(trend.len(), appends.min(TREND_CAPACITY));

        // Arrival order preserved over the retained suffix
        let first_retained = appends.saturating_sub(TREND_CAPACITY) as i64;
        let markers: Vec<i64> = trend.entries().map(|e| e.timestamp).collect();
        let expected: Vec<i64> = (first_retained..appends as i64).collect();
        prop_assert_eq!(markers, expected);
    }
}

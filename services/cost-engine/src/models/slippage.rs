//! Slippage estimation via ask-side depth walk
//!
//! `expected_slippage` measures cost against the target notional. The
//! walk's cost is constructed to sum to the target at the crossing
//! level, so the figure is near zero whenever the book is deep enough;
//! tests pin that behavior. `slippage_vs_best_ask` compares the achieved
//! average fill price with the best quote instead.
//!
//! If total ask depth is smaller than the target, the walk reports
//! `exhausted` and the expected-slippage denominator falls back to the
//! filled notional, which is exactly zero by construction.

use rust_decimal::Decimal;

use types::book::{BookLevel, OrderBookSnapshot};

/// Result of walking the ask ladder for a target notional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthWalk {
    /// Total quote currency spent across consumed levels.
    pub cost: Decimal,
    /// Notional actually consumed (equals the target unless exhausted).
    pub filled_notional: Decimal,
    /// Base units acquired.
    pub filled_units: Decimal,
    /// True when the book ran out before the target notional was reached.
    pub exhausted: bool,
}

/// Walk ask levels in ascending price order until `quantity_usd` of
/// notional is consumed, taking a partial fill at the crossing level.
pub fn walk_asks(asks: &[BookLevel], quantity_usd: Decimal) -> DepthWalk {
    let mut cost = Decimal::ZERO;
    let mut filled_notional = Decimal::ZERO;
    let mut filled_units = Decimal::ZERO;

    if quantity_usd <= Decimal::ZERO {
        return DepthWalk {
            cost,
            filled_notional,
            filled_units,
            exhausted: false,
        };
    }

    for level in asks {
        let price = level.price.as_decimal();
        let level_notional = level.notional();

        if filled_notional + level_notional >= quantity_usd && !price.is_zero() {
            let needed_units = (quantity_usd - filled_notional) / price;
            cost += needed_units * price;
            filled_units += needed_units;
            filled_notional = quantity_usd;
            return DepthWalk {
                cost,
                filled_notional,
                filled_units,
                exhausted: false,
            };
        }

        cost += level_notional;
        filled_notional += level_notional;
        filled_units += level.size.as_decimal();
    }

    DepthWalk {
        cost,
        filled_notional,
        filled_units,
        exhausted: true,
    }
}

/// Target-relative slippage: `(cost - target) / target`, rounded to 6 dp.
///
/// Empty asks or empty bids return exactly zero. When the book is
/// exhausted the denominator is the filled notional instead of the
/// target.
pub fn expected_slippage(book: &OrderBookSnapshot, quantity_usd: Decimal) -> Decimal {
    if !book.has_both_sides() || quantity_usd <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let walk = walk_asks(&book.asks, quantity_usd);
    let denominator = if walk.exhausted {
        walk.filled_notional
    } else {
        quantity_usd
    };
    if denominator.is_zero() {
        return Decimal::ZERO;
    }

    ((walk.cost - denominator) / denominator).round_dp(6)
}

/// Corrected slippage: deviation of the achieved average fill price from
/// the best ask, `(avg - best) / best`, rounded to 6 dp.
pub fn slippage_vs_best_ask(book: &OrderBookSnapshot, quantity_usd: Decimal) -> Decimal {
    if !book.has_both_sides() || quantity_usd <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let best_ask = match book.best_ask() {
        Some(p) if !p.is_zero() => p.as_decimal(),
        _ => return Decimal::ZERO,
    };

    let walk = walk_asks(&book.asks, quantity_usd);
    if walk.filled_units.is_zero() {
        return Decimal::ZERO;
    }

    let avg_price = walk.cost / walk.filled_units;
    ((avg_price - best_ask) / best_ask).round_dp(6)
}

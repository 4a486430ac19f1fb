//! Market impact estimation
//!
//! Permanent-plus-temporary impact model (Almgren-Chriss style) with
//! fixed calibration constants. Calibration against real data is out of
//! scope.

use rust_decimal::Decimal;

use types::book::OrderBookSnapshot;

/// Permanent impact coefficient.
fn gamma() -> Decimal {
    Decimal::new(2, 6) // 2e-6
}

/// Temporary impact coefficient.
fn eta() -> Decimal {
    Decimal::new(1, 5) // 1e-5
}

/// Volatility coupling coefficient.
fn vol_coupling() -> Decimal {
    Decimal::new(1, 1) // 0.1
}

/// Estimated market impact of executing `quantity_usd` at the current
/// mid price: `gamma·q + eta·q² + volatility·k·q`, with `q` the quantity
/// in base units. Rounded to 6 dp. Returns zero when either book side is
/// empty.
pub fn estimate_impact(
    book: &OrderBookSnapshot,
    quantity_usd: Decimal,
    volatility: Decimal,
) -> Decimal {
    let mid = match book.mid_price() {
        Some(mid) if mid > Decimal::ZERO => mid,
        _ => return Decimal::ZERO,
    };

    let q = quantity_usd / mid;
    let impact = gamma() * q + eta() * q * q + volatility * vol_coupling() * q;
    impact.round_dp(6)
}

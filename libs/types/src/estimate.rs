//! Cost estimate output types
//!
//! A `CostEstimate` is produced once per compute tick and is immutable
//! after construction; every consumer (alerting, trend history,
//! presentation) owns its own copy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a cost estimate.
///
/// Uses UUID v7 so estimates sort chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimateId(Uuid);

impl EstimateId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EstimateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EstimateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Predicted maker/taker proportions for a hypothetical order.
///
/// Invariant: `maker + taker == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquiditySplit {
    /// Fraction expected to add liquidity.
    pub maker: Decimal,
    /// Fraction expected to remove liquidity.
    pub taker: Decimal,
}

impl LiquiditySplit {
    /// Fully-taker split (market orders).
    pub fn all_taker() -> Self {
        Self {
            maker: Decimal::ZERO,
            taker: Decimal::ONE,
        }
    }

    /// Even split between maker and taker.
    pub fn even() -> Self {
        let half = Decimal::new(5, 1); // 0.5
        Self {
            maker: half,
            taker: half,
        }
    }

    /// Whether the fractions sum to exactly one.
    pub fn is_normalized(&self) -> bool {
        self.maker + self.taker == Decimal::ONE
    }
}

/// One compute tick's transaction-cost estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Time-sortable estimate id.
    pub id: EstimateId,
    /// Expected slippage as a fraction of target notional (any sign).
    pub slippage: Decimal,
    /// Expected fees in quote currency.
    pub fees: Decimal,
    /// Expected market impact per the calibrated model.
    pub market_impact: Decimal,
    /// Raw aggregate of the three model outputs: slippage + fees + market_impact.
    pub net_cost: Decimal,
    /// Consistent-unit aggregate with all terms in quote currency.
    pub net_cost_usd: Decimal,
    /// Fraction of the order expected to add liquidity.
    pub maker_fraction: Decimal,
    /// Fraction of the order expected to remove liquidity.
    pub taker_fraction: Decimal,
    /// Wall-clock cost of computing this estimate, in milliseconds.
    pub latency_ms: f64,
    /// Unix nanoseconds timestamp when the estimate was produced.
    pub timestamp: i64,
}

impl CostEstimate {
    /// The maker/taker proportions as a split.
    pub fn liquidity_split(&self) -> LiquiditySplit {
        LiquiditySplit {
            maker: self.maker_fraction,
            taker: self.taker_fraction,
        }
    }
}

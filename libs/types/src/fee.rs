//! Fee tier types
//!
//! Spot fee tiers with fixed taker rates. The tier set is closed; any
//! unrecognized tier name falls back to the base `Regular` rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account fee tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeTier {
    /// Base tier (0.10%).
    Regular,
    /// VIP level 1 (0.08%).
    #[serde(rename = "VIP1")]
    Vip1,
    /// VIP level 2 (0.06%).
    #[serde(rename = "VIP2")]
    Vip2,
}

impl FeeTier {
    /// Fee rate for this tier as a fraction of notional.
    pub fn rate(&self) -> Decimal {
        match self {
            FeeTier::Regular => Decimal::new(10, 4),  // 0.0010
            FeeTier::Vip1 => Decimal::new(8, 4),      // 0.0008
            FeeTier::Vip2 => Decimal::new(6, 4),      // 0.0006
        }
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        FeeTier::Regular
    }
}

impl FromStr for FeeTier {
    type Err = std::convert::Infallible;

    /// Unknown tier names map to the base rate rather than failing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "VIP1" => FeeTier::Vip1,
            "VIP2" => FeeTier::Vip2,
            _ => FeeTier::Regular,
        })
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeeTier::Regular => write!(f, "Regular"),
            FeeTier::Vip1 => write!(f, "VIP1"),
            FeeTier::Vip2 => write!(f, "VIP2"),
        }
    }
}

//! Order classification types

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of hypothetical order being costed.
///
/// Anything that is not a market order rests on the book for some part
/// of its life, which is all the maker/taker classifier needs to know.
/// Unknown wire values decode as `Limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Execute immediately against resting liquidity.
    Market,
    /// Rest on the book at a specified price.
    #[serde(other)]
    Limit,
}

impl OrderType {
    pub fn is_market(&self) -> bool {
        matches!(self, OrderType::Market)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Market => write!(f, "market"),
            OrderType::Limit => write!(f, "limit"),
        }
    }
}

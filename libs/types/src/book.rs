//! Order book snapshot types
//!
//! A snapshot is the decoded form of one L2 feed message: full bid and
//! ask ladders at a point in time. Bids are ordered descending by price
//! (best bid first), asks ascending (best ask first).
//!
//! An empty side is a valid "no data" state. Consumers degrade to
//! neutral results rather than failing on it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::{Price, Quantity};

/// A single price level in the order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    /// The price of this level.
    pub price: Price,
    /// Available size at this level.
    pub size: Quantity,
}

impl BookLevel {
    pub fn new(price: Price, size: Quantity) -> Self {
        Self { price, size }
    }

    /// Notional value of the level (price × size) in quote currency.
    pub fn notional(&self) -> Decimal {
        self.price.as_decimal() * self.size.as_decimal()
    }
}

/// An immutable L2 order book snapshot for a single instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// Instrument symbol.
    pub symbol: String,
    /// Bid levels in descending price order (best first).
    pub bids: Vec<BookLevel>,
    /// Ask levels in ascending price order (best first).
    pub asks: Vec<BookLevel>,
    /// Unix nanoseconds timestamp when the snapshot was captured.
    pub captured_at: i64,
}

impl OrderBookSnapshot {
    /// Create a snapshot with no levels on either side.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: Vec::new(),
            asks: Vec::new(),
            captured_at: 0,
        }
    }

    /// Best (highest) bid, if any.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.first().map(|l| l.price)
    }

    /// Best (lowest) ask, if any.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.first().map(|l| l.price)
    }

    /// Mid-market price (average of best bid and best ask).
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => {
                Some((bid.as_decimal() + ask.as_decimal()) / Decimal::from(2))
            }
            _ => None,
        }
    }

    /// Spread between best ask and best bid.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.as_decimal() - bid.as_decimal()),
            _ => None,
        }
    }

    /// Whether both sides carry at least one level.
    pub fn has_both_sides(&self) -> bool {
        !self.bids.is_empty() && !self.asks.is_empty()
    }

    /// Total ask-side notional across all levels.
    pub fn ask_depth_notional(&self) -> Decimal {
        self.asks.iter().map(|l| l.notional()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(price: u64, size: &str) -> BookLevel {
        BookLevel::new(Price::from_u64(price), Quantity::from_str(size).unwrap())
    }

    fn populated() -> OrderBookSnapshot {
        OrderBookSnapshot {
            symbol: "BTC-USDT".to_string(),
            bids: vec![level(49900, "2.0"), level(49800, "1.0")],
            asks: vec![level(50000, "1.0"), level(50100, "3.0")],
            captured_at: 1_708_123_456_789_000_000,
        }
    }

    #[test]
    fn test_empty_snapshot() {
        let snap = OrderBookSnapshot::empty("BTC-USDT");
        assert!(snap.best_bid().is_none());
        assert!(snap.best_ask().is_none());
        assert!(snap.mid_price().is_none());
        assert!(snap.spread().is_none());
        assert!(!snap.has_both_sides());
        assert_eq!(snap.ask_depth_notional(), Decimal::ZERO);
    }

    #[test]
    fn test_best_prices() {
        let snap = populated();
        assert_eq!(snap.best_bid(), Some(Price::from_u64(49900)));
        assert_eq!(snap.best_ask(), Some(Price::from_u64(50000)));
        assert!(snap.has_both_sides());
    }

    #[test]
    fn test_mid_and_spread() {
        let snap = populated();
        assert_eq!(snap.mid_price(), Some(Decimal::from(49950)));
        assert_eq!(snap.spread(), Some(Decimal::from(100)));
    }

    #[test]
    fn test_one_sided_book_has_no_mid() {
        let mut snap = populated();
        snap.asks.clear();
        assert!(snap.mid_price().is_none());
        assert!(!snap.has_both_sides());
        assert!(snap.best_bid().is_some());
    }

    #[test]
    fn test_level_notional() {
        let l = level(100, "1.5");
        assert_eq!(l.notional(), Decimal::from(150));
    }

    #[test]
    fn test_ask_depth_notional() {
        let snap = populated();
        // 50000*1.0 + 50100*3.0
        assert_eq!(snap.ask_depth_notional(), Decimal::from(200300));
    }

    #[test]
    fn test_snapshot_serialization() {
        let snap = populated();
        let json = serde_json::to_string(&snap).unwrap();
        let back: OrderBookSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }
}

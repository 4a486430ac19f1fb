//! Maker/taker proportion classifier
//!
//! The classifier is a capability trait so the shipped order-type rule
//! can be swapped for a feature-driven model (book imbalance, learned
//! weights) without touching the pipeline's composition point.

use types::book::OrderBookSnapshot;
use types::estimate::LiquiditySplit;
use types::order::OrderType;

/// Predicts what fraction of an order adds vs. removes liquidity.
pub trait MakerTakerModel: Send + Sync {
    /// Classify a hypothetical order against the current book.
    ///
    /// The returned fractions must sum to 1.
    fn classify(&self, book: &OrderBookSnapshot, order_type: OrderType) -> LiquiditySplit;
}

/// Order-type rule: market orders always take; anything else is assumed
/// to split evenly. The book is not consulted.
pub struct OrderTypeModel;

impl MakerTakerModel for OrderTypeModel {
    fn classify(&self, _book: &OrderBookSnapshot, order_type: OrderType) -> LiquiditySplit {
        if order_type.is_market() {
            LiquiditySplit::all_taker()
        } else {
            LiquiditySplit::even()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_market_order_is_all_taker() {
        let model = OrderTypeModel;
        let snap = OrderBookSnapshot::empty("BTC-USDT");

        let split = model.classify(&snap, OrderType::Market);
        assert_eq!(split.maker, Decimal::ZERO);
        assert_eq!(split.taker, Decimal::ONE);
    }

    #[test]
    fn test_limit_order_splits_evenly() {
        let model = OrderTypeModel;
        let snap = OrderBookSnapshot::empty("BTC-USDT");

        let split = model.classify(&snap, OrderType::Limit);
        assert_eq!(split.maker, Decimal::new(5, 1));
        assert_eq!(split.taker, Decimal::new(5, 1));
    }

    #[test]
    fn test_fractions_always_normalized() {
        let model = OrderTypeModel;
        let snap = OrderBookSnapshot::empty("BTC-USDT");

        for order_type in [OrderType::Market, OrderType::Limit] {
            assert!(model.classify(&snap, order_type).is_normalized());
        }
    }
}

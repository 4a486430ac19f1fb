//! Expected fee calculation
//!
//! Pure tier-table lookup. No validation is performed: a non-positive
//! notional yields a non-positive fee.

use rust_decimal::Decimal;
use types::fee::FeeTier;

/// Expected fee in quote currency: `notional × rate`, rounded to 4 dp.
pub fn fee(notional_usd: Decimal, tier: FeeTier) -> Decimal {
    (notional_usd * tier.rate()).round_dp(4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_regular_tier() {
        assert_eq!(
            fee(Decimal::from(1000), FeeTier::Regular),
            Decimal::from_str_exact("1.0000").unwrap()
        );
    }

    #[test]
    fn test_vip_tiers() {
        assert_eq!(
            fee(Decimal::from(1000), FeeTier::Vip1),
            Decimal::from_str_exact("0.8000").unwrap()
        );
        assert_eq!(
            fee(Decimal::from(1000), FeeTier::Vip2),
            Decimal::from_str_exact("0.6000").unwrap()
        );
    }

    #[test]
    fn test_unknown_tier_uses_regular_rate() {
        let unknown = FeeTier::from_str("gold-plated").unwrap();
        assert_eq!(
            fee(Decimal::from(1000), unknown),
            fee(Decimal::from(1000), FeeTier::Regular)
        );
    }

    #[test]
    fn test_rounding_to_four_places() {
        // 123.456789 * 0.0010 = 0.123456789 → 0.1235
        assert_eq!(
            fee(Decimal::from_str_exact("123.456789").unwrap(), FeeTier::Regular),
            Decimal::from_str_exact("0.1235").unwrap()
        );
    }

    #[test]
    fn test_non_positive_notional_accepted() {
        assert_eq!(fee(Decimal::ZERO, FeeTier::Regular), Decimal::ZERO);
        assert!(fee(Decimal::from(-1000), FeeTier::Regular) < Decimal::ZERO);
    }
}

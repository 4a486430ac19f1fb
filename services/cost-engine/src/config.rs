//! Configuration for the feed and the compute cycle
//!
//! All parameters are supplied by the external caller. Boundary
//! validation covers only the numeric-range expectations on the target
//! notional and volatility; the calculators themselves accept degenerate
//! inputs and produce degenerate-but-defined output.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

use types::fee::FeeTier;
use types::order::OrderType;

use crate::alerts::AlertThresholds;

/// Errors rejected at the configuration boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("quantity_usd must be positive, got {0}")]
    NonPositiveQuantity(Decimal),

    #[error("volatility must be within [0, 1], got {0}")]
    VolatilityOutOfRange(Decimal),
}

/// Connection settings for the order-book feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Base endpoint of the L2 feed, without exchange/symbol suffix.
    pub endpoint: String,
    /// Exchange identifier (lowercased into the URL path).
    pub exchange: String,
    /// Instrument symbol.
    pub symbol: String,
    /// Connect attempt timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Bound on a single receive so shutdown stays prompt, in milliseconds.
    pub read_timeout_ms: u64,
    /// Fixed delay between reconnect attempts, in milliseconds.
    pub backoff_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: "wss://ws.gomarket-cpp.goquant.io/ws/l2-orderbook".to_string(),
            exchange: "OKX".to_string(),
            symbol: "BTC-USDT-SWAP".to_string(),
            connect_timeout_ms: 10_000,
            read_timeout_ms: 10_000,
            backoff_ms: 2_000,
        }
    }
}

impl FeedConfig {
    /// Feed config for a specific instrument, other settings default.
    pub fn for_instrument(exchange: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            exchange: exchange.into(),
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Full connection URL: `<endpoint>/<exchange>/<symbol>`.
    pub fn url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.exchange.to_lowercase(),
            self.symbol
        )
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

/// Parameters of the hypothetical trade being costed, plus cadence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Exchange identifier.
    pub exchange: String,
    /// Instrument symbol.
    pub symbol: String,
    /// Order type of the hypothetical trade.
    pub order_type: OrderType,
    /// Target notional in quote currency. Must be positive.
    pub quantity_usd: Decimal,
    /// Volatility input to the impact model, within [0, 1].
    pub volatility: Decimal,
    /// Account fee tier.
    pub fee_tier: FeeTier,
    /// Alert thresholds for slippage and impact.
    pub thresholds: AlertThresholds,
    /// Delay between compute ticks, in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exchange: "OKX".to_string(),
            symbol: "BTC-USDT-SWAP".to_string(),
            order_type: OrderType::Market,
            quantity_usd: Decimal::from(100),
            volatility: Decimal::new(1, 1), // 0.1
            fee_tier: FeeTier::Regular,
            thresholds: AlertThresholds::default(),
            tick_interval_ms: 500,
        }
    }
}

impl EngineConfig {
    /// Check the numeric-range expectations on the trade parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quantity_usd <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveQuantity(self.quantity_usd));
        }
        if self.volatility < Decimal::ZERO || self.volatility > Decimal::ONE {
            return Err(ConfigError::VolatilityOutOfRange(self.volatility));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

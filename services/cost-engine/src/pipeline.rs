//! Per-tick cost model pipeline
//!
//! Composes the four calculators into one evaluation of a snapshot
//! against the configured hypothetical trade. `compute_tick` is the
//! core's pull API: the caller decides when to invoke it and owns the
//! resulting estimate.

use std::time::Instant;

use types::book::OrderBookSnapshot;
use types::estimate::{CostEstimate, EstimateId};

use crate::clock;
use crate::config::EngineConfig;
use crate::models::fees::fee;
use crate::models::impact::estimate_impact;
use crate::models::maker_taker::{MakerTakerModel, OrderTypeModel};
use crate::models::slippage::expected_slippage;

/// The composed cost model for one instrument.
pub struct CostPipeline {
    config: EngineConfig,
    classifier: Box<dyn MakerTakerModel>,
}

impl CostPipeline {
    /// Pipeline with the shipped order-type classifier.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_classifier(config, Box::new(OrderTypeModel))
    }

    /// Pipeline with a custom maker/taker classifier.
    pub fn with_classifier(config: EngineConfig, classifier: Box<dyn MakerTakerModel>) -> Self {
        Self { config, classifier }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one snapshot into a cost estimate.
    ///
    /// `net_cost` is the raw sum of the slippage, fee and impact figures
    /// as the models emit them; `net_cost_usd` scales the fractional
    /// terms by the target notional so all three are in quote currency.
    pub fn compute_tick(&self, book: &OrderBookSnapshot) -> CostEstimate {
        let started = Instant::now();
        let quantity = self.config.quantity_usd;

        let slippage = expected_slippage(book, quantity);
        let fees = fee(quantity, self.config.fee_tier);
        let market_impact = estimate_impact(book, quantity, self.config.volatility);
        let net_cost = slippage + fees + market_impact;
        let net_cost_usd =
            (slippage * quantity + fees + market_impact * quantity).round_dp(4);
        let split = self.classifier.classify(book, self.config.order_type);

        CostEstimate {
            id: EstimateId::new(),
            slippage,
            fees,
            market_impact,
            net_cost,
            net_cost_usd,
            maker_fraction: split.maker,
            taker_fraction: split.taker,
            latency_ms: clock::elapsed_ms(started),
            timestamp: clock::unix_nanos(),
        }
    }
}

//! Compute-cycle task
//!
//! Runs on its own cadence, independent of the feed: each tick reads the
//! latest snapshot from the store, evaluates the cost pipeline, checks
//! alert thresholds and records the estimate in the trend history. The
//! result is published on a watch channel for the external presentation
//! consumer; a tick with no fresh snapshot publishes nothing.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use types::book::OrderBookSnapshot;

use crate::alerts::{self, Alert};
use crate::config::EngineConfig;
use crate::pipeline::CostPipeline;
use crate::store::SnapshotStore;
use crate::trend::TrendHistory;

/// One compute tick's output for presentation consumers.
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub estimate: types::estimate::CostEstimate,
    pub alerts: Vec<Alert>,
}

/// The per-tick evaluation cycle. Owns the pipeline, thresholds and
/// trend history; the snapshot store is the only shared state it reads.
pub struct CostEngine {
    pipeline: CostPipeline,
    trend: TrendHistory,
    last_seen: Option<Arc<OrderBookSnapshot>>,
}

impl CostEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            pipeline: CostPipeline::new(config),
            trend: TrendHistory::new(),
            last_seen: None,
        }
    }

    /// With a custom pipeline (e.g. a replaced maker/taker classifier).
    pub fn with_pipeline(pipeline: CostPipeline) -> Self {
        Self {
            pipeline,
            trend: TrendHistory::new(),
            last_seen: None,
        }
    }

    pub fn trend(&self) -> &TrendHistory {
        &self.trend
    }

    /// Evaluate one snapshot: estimate, alerts, trend append.
    pub fn process(&mut self, book: &OrderBookSnapshot) -> TickOutput {
        let estimate = self.pipeline.compute_tick(book);
        let alerts = alerts::evaluate(&estimate, &self.pipeline.config().thresholds);
        self.trend.append(estimate.clone());
        TickOutput { estimate, alerts }
    }

    /// Run one poll against the store.
    ///
    /// Returns `None` before the first publish and when the stored
    /// snapshot is the same one processed last tick; the cycle only
    /// recomputes on fresh data.
    pub fn poll(&mut self, store: &SnapshotStore) -> Option<TickOutput> {
        let snapshot = store.get()?;
        if let Some(last) = &self.last_seen {
            if Arc::ptr_eq(last, &snapshot) {
                return None;
            }
        }
        self.last_seen = Some(snapshot.clone());
        Some(self.process(&snapshot))
    }

    /// Drive the compute cycle until shutdown.
    pub async fn run(
        mut self,
        store: Arc<SnapshotStore>,
        output: watch::Sender<Option<TickOutput>>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut ticker = tokio::time::interval(self.pipeline.config().tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            symbol = %self.pipeline.config().symbol,
            interval_ms = self.pipeline.config().tick_interval_ms,
            "engine_started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(tick) = self.poll(&store) {
                        debug!(
                            slippage = %tick.estimate.slippage,
                            net_cost = %tick.estimate.net_cost,
                            alerts = tick.alerts.len(),
                            "tick_computed"
                        );
                        let _ = output.send(Some(tick));
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!(trend_len = self.trend.len(), "engine_stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::time::Duration;
    use types::book::BookLevel;
    use types::numeric::{Price, Quantity};

    fn snapshot(best_ask: u64) -> OrderBookSnapshot {
        OrderBookSnapshot {
            symbol: "BTC-USDT".to_string(),
            bids: vec![BookLevel::new(
                Price::from_u64(best_ask - 1),
                Quantity::from_u64(2),
            )],
            asks: vec![BookLevel::new(
                Price::from_u64(best_ask),
                Quantity::from_u64(10),
            )],
            captured_at: 0,
        }
    }

    #[test]
    fn test_poll_skips_before_first_publish() {
        let store = SnapshotStore::new();
        let mut engine = CostEngine::new(EngineConfig::default());
        assert!(engine.poll(&store).is_none());
        assert!(engine.trend().is_empty());
    }

    #[test]
    fn test_poll_skips_repeated_snapshot() {
        let store = SnapshotStore::new();
        let mut engine = CostEngine::new(EngineConfig::default());

        store.set(snapshot(50000));
        assert!(engine.poll(&store).is_some());
        // Same stored snapshot, nothing fresh to compute
        assert!(engine.poll(&store).is_none());

        store.set(snapshot(50001));
        assert!(engine.poll(&store).is_some());
        assert_eq!(engine.trend().len(), 2);
    }

    #[test]
    fn test_process_appends_trend_and_checks_alerts() {
        let mut engine = CostEngine::new(EngineConfig::default());
        let out = engine.process(&snapshot(50000));

        assert!(out.alerts.is_empty());
        assert_eq!(engine.trend().len(), 1);
        assert_eq!(
            engine.trend().latest().unwrap().net_cost,
            out.estimate.net_cost
        );
    }

    #[test]
    fn test_alerts_fire_through_engine() {
        // Tiny thresholds so the default scenario breaches impact
        let config = EngineConfig {
            thresholds: crate::alerts::AlertThresholds {
                slippage: Decimal::new(1, 6),
                impact: Decimal::ZERO,
            },
            ..EngineConfig::default()
        };
        let mut engine = CostEngine::new(config);
        let out = engine.process(&snapshot(50000));
        assert!(out.alerts.iter().any(|a| a.metric == "market_impact"));
    }

    #[tokio::test]
    async fn test_run_publishes_and_stops() {
        let store = Arc::new(SnapshotStore::new());
        store.set(snapshot(50000));

        let config = EngineConfig {
            tick_interval_ms: 10,
            ..EngineConfig::default()
        };
        let engine = CostEngine::new(config);

        let (out_tx, mut out_rx) = watch::channel(None);
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(engine.run(store.clone(), out_tx, stop_rx));

        // First tick output arrives
        tokio::time::timeout(Duration::from_secs(2), out_rx.changed())
            .await
            .expect("engine produced no output")
            .unwrap();
        assert!(out_rx.borrow().is_some());

        // Prompt shutdown
        stop_tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("engine did not stop promptly")
            .unwrap();
    }
}

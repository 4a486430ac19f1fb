use std::sync::Arc;

use tokio::sync::watch;

use cost_engine::config::{EngineConfig, FeedConfig};
use cost_engine::engine::CostEngine;
use cost_engine::feed::BookFeed;
use cost_engine::store::SnapshotStore;

/// Load the engine config from an optional JSON file argument, falling
/// back to defaults.
fn load_config() -> Result<EngineConfig, anyhow::Error> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = load_config()?;
    config.validate()?;

    tracing::info!(
        exchange = %config.exchange,
        symbol = %config.symbol,
        quantity_usd = %config.quantity_usd,
        "Starting cost engine service"
    );

    // Shared latest-snapshot store, fed by the ingestor
    let store = Arc::new(SnapshotStore::new());
    let feed = BookFeed::new(
        FeedConfig::for_instrument(&config.exchange, &config.symbol),
        store.clone(),
    );
    feed.start().await;

    // Compute cycle on its own cadence
    let (out_tx, mut out_rx) = watch::channel(None);
    let (stop_tx, stop_rx) = watch::channel(false);
    let engine_task = tokio::spawn(CostEngine::new(config).run(store, out_tx, stop_rx));

    // Presentation consumer: log each tick until interrupted
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = out_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let tick = out_rx.borrow_and_update().clone();
                if let Some(tick) = tick {
                    let est = &tick.estimate;
                    tracing::info!(
                        slippage = %est.slippage,
                        fees = %est.fees,
                        market_impact = %est.market_impact,
                        net_cost = %est.net_cost,
                        net_cost_usd = %est.net_cost_usd,
                        maker = %est.maker_fraction,
                        taker = %est.taker_fraction,
                        latency_ms = est.latency_ms,
                        "estimate"
                    );
                    if tick.alerts.is_empty() {
                        tracing::info!("all metrics within thresholds");
                    } else {
                        for alert in &tick.alerts {
                            tracing::warn!(metric = %alert.metric, "{}", alert.message);
                        }
                    }
                }
            }
        }
    }

    tracing::info!("Shutting down");
    let _ = stop_tx.send(true);
    feed.stop().await;
    let _ = engine_task.await;

    Ok(())
}

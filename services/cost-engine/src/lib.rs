//! Cost Engine Service
//!
//! Ingests a live L2 order-book feed for a single instrument and produces:
//! - The most recent snapshot, shared between tasks (SnapshotStore)
//! - Per-tick transaction-cost estimates (fees, slippage, market impact,
//!   maker/taker split, net cost)
//! - Threshold-based alerts
//! - A bounded trend history for downstream consumers
//!
//! Decision support only: the engine estimates the cost of a hypothetical
//! trade and never sends orders.
//!
//! # Architecture
//!
//! ```text
//!  WebSocket Feed
//!        │
//!    ┌───▼────┐
//!    │BookFeed│  ← connect / decode / reconnect-with-backoff
//!    └───┬────┘
//!        │ set()
//!  ┌─────▼───────┐
//!  │SnapshotStore│  ← single writer, many readers, latest value wins
//!  └─────┬───────┘
//!        │ get()
//!  ┌─────▼──────┐     ┌───────┐
//!  │ CostEngine │────▶│Alerts │
//!  │ (tick loop)│     └───────┘
//!  └─────┬──────┘     ┌───────┐
//!        └───────────▶│Trend  │
//!                     └───────┘
//! ```
//!
//! The feed task and the compute cycle run independently; the snapshot
//! store is the only mutable state crossing task boundaries.

pub mod alerts;
pub mod clock;
pub mod config;
pub mod engine;
pub mod feed;
pub mod messages;
pub mod models;
pub mod pipeline;
pub mod store;
pub mod trend;

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";

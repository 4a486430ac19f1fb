//! Resilient streaming ingestion of the L2 order-book feed
//!
//! `BookFeed` is a long-lived service object constructed once and shared
//! by handle: `start()` spawns the background connection loop, `stop()`
//! signals shutdown and waits (bounded) for the loop to exit. Transport
//! and decode failures are never fatal: the loop logs, closes the
//! connection and retries after a fixed backoff, indefinitely, until
//! stopped. A malformed message is dropped without touching the
//! previously published snapshot.
//!
//! The shutdown signal is checked before and after every blocking await,
//! and single receives are bounded by `read_timeout`, so shutdown
//! latency never depends on a slow network call.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::clock;
use crate::config::FeedConfig;
use crate::messages;
use crate::store::SnapshotStore;

/// Grace period for the background task to exit after `stop()`.
const STOP_GRACE: Duration = Duration::from_secs(5);

/// Failures of a single connection attempt or established stream.
///
/// All variants are recovered inside the feed loop via backoff-retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    #[error("connect failed: {0}")]
    Connect(String),

    #[error("connect timed out")]
    ConnectTimeout,

    #[error("no message within read timeout")]
    ReadTimeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("stream closed by server")]
    StreamClosed,
}

/// Counters for feed observability.
#[derive(Debug, Default)]
pub struct FeedStats {
    pub messages_received: AtomicU64,
    pub snapshots_published: AtomicU64,
    pub decode_errors: AtomicU64,
    pub reconnects: AtomicU64,
}

impl FeedStats {
    /// Export counters for logging or exposition.
    pub fn export(&self) -> BTreeMap<String, u64> {
        let mut m = BTreeMap::new();
        m.insert(
            "messages_received".to_string(),
            self.messages_received.load(Ordering::Relaxed),
        );
        m.insert(
            "snapshots_published".to_string(),
            self.snapshots_published.load(Ordering::Relaxed),
        );
        m.insert(
            "decode_errors".to_string(),
            self.decode_errors.load(Ordering::Relaxed),
        );
        m.insert(
            "reconnects".to_string(),
            self.reconnects.load(Ordering::Relaxed),
        );
        m
    }
}

/// Background order-book ingestor with reconnect-forever semantics.
pub struct BookFeed {
    config: FeedConfig,
    store: Arc<SnapshotStore>,
    running: AtomicBool,
    shutdown_tx: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
    stats: FeedStats,
}

impl BookFeed {
    pub fn new(config: FeedConfig, store: Arc<SnapshotStore>) -> Arc<Self> {
        let (shutdown_tx, _) = watch::channel(false);
        Arc::new(Self {
            config,
            store,
            running: AtomicBool::new(false),
            shutdown_tx,
            handle: Mutex::new(None),
            stats: FeedStats::default(),
        })
    }

    pub fn stats(&self) -> &FeedStats {
        &self.stats
    }

    /// Whether the background loop is alive.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Spawn the connection loop if it is not already running.
    pub async fn start(self: &Arc<Self>) {
        let mut handle = self.handle.lock().await;
        if handle.is_some() {
            warn!("feed already running");
            return;
        }

        // send_replace updates the value even with no live receiver yet
        self.shutdown_tx.send_replace(false);
        self.running.store(true, Ordering::SeqCst);

        let feed = self.clone();
        *handle = Some(tokio::spawn(async move {
            feed.run_loop().await;
        }));

        info!(url = %self.config.url(), "feed_started");
    }

    /// Signal shutdown and wait for the loop to exit. Idempotent and
    /// callable from any task; bounded by a grace period.
    pub async fn stop(&self) {
        self.shutdown_tx.send_replace(true);

        let taken = self.handle.lock().await.take();
        if let Some(mut handle) = taken {
            if timeout(STOP_GRACE, &mut handle).await.is_err() {
                warn!("feed task exceeded stop grace period; aborting");
                handle.abort();
                let _ = handle.await;
            }
        }

        self.running.store(false, Ordering::SeqCst);
        info!(stats = ?self.stats.export(), "feed_stopped");
    }

    async fn run_loop(self: Arc<Self>) {
        let url = self.config.url();
        let mut shutdown = self.shutdown_tx.subscribe();

        loop {
            if *shutdown.borrow() {
                break;
            }

            match self.run_connection(&url, &mut shutdown).await {
                Ok(()) => break, // shutdown requested
                Err(err) => {
                    self.stats.reconnects.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        error = %err,
                        backoff_ms = self.config.backoff_ms,
                        "feed_error"
                    );

                    tokio::select! {
                        _ = sleep(self.config.backoff()) => {}
                        _ = shutdown.changed() => {}
                    }
                }
            }
        }

        self.running.store(false, Ordering::SeqCst);
    }

    /// Run a single connection lifecycle.
    ///
    /// Returns `Ok(())` only when shutdown was requested; any failure is
    /// an `Err` for the outer loop to back off on.
    async fn run_connection(
        &self,
        url: &str,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<(), FeedError> {
        let ws = tokio::select! {
            connected = timeout(self.config.connect_timeout(), connect_async(url)) => {
                match connected {
                    Ok(Ok((ws, _response))) => ws,
                    Ok(Err(e)) => return Err(FeedError::Connect(e.to_string())),
                    Err(_) => return Err(FeedError::ConnectTimeout),
                }
            }
            _ = shutdown.changed() => return Ok(()),
        };

        info!(symbol = %self.config.symbol, "feed_connected");
        let (mut write, mut read) = ws.split();

        loop {
            let received = tokio::select! {
                received = timeout(self.config.read_timeout(), read.next()) => received,
                _ = shutdown.changed() => {
                    let _ = write.send(Message::Close(None)).await;
                    return Ok(());
                }
            };

            match received {
                Err(_) => return Err(FeedError::ReadTimeout),
                Ok(None) => return Err(FeedError::StreamClosed),
                Ok(Some(Err(e))) => return Err(FeedError::Transport(e.to_string())),
                Ok(Some(Ok(Message::Text(text)))) => self.handle_text(&text),
                Ok(Some(Ok(Message::Ping(payload)))) => {
                    let _ = write.send(Message::Pong(payload)).await;
                }
                Ok(Some(Ok(Message::Close(_)))) => return Err(FeedError::StreamClosed),
                Ok(Some(Ok(_))) => {} // binary/pong frames ignored
            }
        }
    }

    /// Decode one text frame and publish the snapshot on success.
    fn handle_text(&self, text: &str) {
        self.stats.messages_received.fetch_add(1, Ordering::Relaxed);

        match messages::decode_snapshot(text, &self.config.symbol, clock::unix_nanos()) {
            Ok(snapshot) => {
                debug!(
                    bids = snapshot.bids.len(),
                    asks = snapshot.asks.len(),
                    "snapshot_published"
                );
                self.store.set(snapshot);
                self.stats
                    .snapshots_published
                    .fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
                // Drop the message; the previous snapshot stays current.
                self.stats.decode_errors.fetch_add(1, Ordering::Relaxed);
                warn!(error = %err, "message_dropped");
            }
        }
    }
}

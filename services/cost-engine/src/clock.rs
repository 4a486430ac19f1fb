//! Wall-clock helpers
//!
//! Timestamps are Unix nanoseconds as `i64`; per-tick compute latency is
//! reported in milliseconds rounded to two decimal places.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Current Unix timestamp in nanoseconds.
pub fn unix_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0)
}

/// Milliseconds elapsed since `started`, rounded to 2 decimal places.
pub fn elapsed_ms(started: Instant) -> f64 {
    let ms = started.elapsed().as_secs_f64() * 1_000.0;
    (ms * 100.0).round() / 100.0
}

//! Wire payload decoding for the L2 order-book feed
//!
//! A feed message carries `asks` and `bids` as ordered sequences of
//! `[price, size]` string pairs. Any other fields are ignored. A message
//! that fails to decode is dropped by the feed; the previously published
//! snapshot stays in place.

use serde::Deserialize;

use types::book::{BookLevel, OrderBookSnapshot};
use types::numeric::{Price, Quantity};

/// Errors decoding a single feed message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed payload: {0}")]
    Json(String),

    #[error("invalid {side} level at index {index}: [{price}, {size}]")]
    BadLevel {
        side: &'static str,
        index: usize,
        price: String,
        size: String,
    },
}

/// Decoded form of one L2 book message. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct L2BookMessage {
    #[serde(default)]
    pub asks: Vec<[String; 2]>,
    #[serde(default)]
    pub bids: Vec<[String; 2]>,
}

impl L2BookMessage {
    /// Parse a raw JSON text frame.
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(text).map_err(|e| DecodeError::Json(e.to_string()))
    }

    /// Build a snapshot from the decoded levels.
    ///
    /// Negative or non-numeric prices and sizes reject the whole message.
    pub fn into_snapshot(
        self,
        symbol: &str,
        captured_at: i64,
    ) -> Result<OrderBookSnapshot, DecodeError> {
        let bids = decode_side(self.bids, "bid")?;
        let asks = decode_side(self.asks, "ask")?;

        Ok(OrderBookSnapshot {
            symbol: symbol.to_string(),
            bids,
            asks,
            captured_at,
        })
    }
}

fn decode_side(
    raw: Vec<[String; 2]>,
    side: &'static str,
) -> Result<Vec<BookLevel>, DecodeError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, [price, size])| {
            match (Price::from_str(&price), Quantity::from_str(&size)) {
                (Some(p), Some(s)) => Ok(BookLevel::new(p, s)),
                _ => Err(DecodeError::BadLevel {
                    side,
                    index,
                    price,
                    size,
                }),
            }
        })
        .collect()
}

/// Decode a raw text frame straight into a snapshot.
pub fn decode_snapshot(
    text: &str,
    symbol: &str,
    captured_at: i64,
) -> Result<OrderBookSnapshot, DecodeError> {
    L2BookMessage::parse(text)?.into_snapshot(symbol, captured_at)
}

//! Feed event types.
//!
//! The two independent market data streams (depth snapshots, trade prints)
//! are carried by one event type so a single consumer sees them in
//! event-time order. A gap in events means "nothing happened", never an
//! error.

use serde::{Deserialize, Serialize};

use mm_core::{Price, Qty};

/// Full depth snapshot of one side-pair of the book.
///
/// `seq` must increase monotonically; the book drops anything older than
/// the last applied snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    /// Feed sequence id.
    pub seq: u64,
    /// Event timestamp (Unix milliseconds).
    pub time_ms: u64,
    /// Bid levels as (price, size).
    pub bids: Vec<(Price, Qty)>,
    /// Ask levels as (price, size).
    pub asks: Vec<(Price, Qty)>,
}

impl DepthSnapshot {
    /// Convenience constructor for a single-level snapshot (top of book).
    pub fn top_of_book(seq: u64, time_ms: u64, best_bid: Price, best_ask: Price) -> Self {
        Self {
            seq,
            time_ms,
            bids: vec![(best_bid, Qty::ONE)],
            asks: vec![(best_ask, Qty::ONE)],
        }
    }
}

/// One trade print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradePrint {
    /// Event timestamp (Unix milliseconds).
    pub time_ms: u64,
    /// Trade price.
    pub price: Price,
    /// Trade quantity.
    pub quantity: Qty,
}

/// A single event from the market data feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedEvent {
    /// Order-book depth snapshot.
    Depth(DepthSnapshot),
    /// Trade print.
    Trade(TradePrint),
}

impl FeedEvent {
    /// Event timestamp (Unix milliseconds).
    pub fn time_ms(&self) -> u64 {
        match self {
            Self::Depth(snapshot) => snapshot.time_ms,
            Self::Trade(print) => print.time_ms,
        }
    }
}

//! Market data feed contract and order-book state.
//!
//! Any feed source (exchange connector or replay driver) delivers
//! `FeedEvent`s in event-time order through a single queue; the engine
//! consumes them one at a time. The `OrderBook` tracks best bid/ask from
//! full depth snapshots and rejects stale sequence ids.

pub mod book;
pub mod events;

pub use book::OrderBook;
pub use events::{DepthSnapshot, FeedEvent, TradePrint};

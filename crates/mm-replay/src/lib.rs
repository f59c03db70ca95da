//! Backtest driver: replays recorded order-book and trade logs.
//!
//! Reconstructs an event-time-ordered merge of the two logs and redelivers
//! it through the same `FeedEvent` contract a live connector uses, so the
//! engine cannot tell a backtest from live operation.

pub mod error;
pub mod replay;

pub use error::{ReplayError, ReplayResult};
pub use replay::ReplaySource;

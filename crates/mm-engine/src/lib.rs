//! Single-instrument market-making engine.
//!
//! Consumes `FeedEvent`s from one queue and reacts:
//!
//! ```text
//! Depth snapshot → OrderBook → TrendQuoter.update_mid()
//!                  ├─ expiry sweep (opportunistic cancels)
//!                  └─ requote: cancel + submit per side
//! Trade print    → VwapTracker + marketable-order matching → fill
//!                  └─ Ledger: cash / inventory / hedge accounting
//! ```
//!
//! All accounting lives behind the engine; handlers complete atomically
//! with respect to each other because a single task consumes the queue.

pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod slots;

pub use config::EngineConfig;
pub use engine::MarketMakerEngine;
pub use error::{EngineError, EngineResult};
pub use ledger::Ledger;
pub use slots::OrderSlots;

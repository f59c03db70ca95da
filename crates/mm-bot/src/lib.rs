//! Market-making bot application.
//!
//! Wires configuration, logging, the replay feed, the market recorder,
//! and the engine together. The engine consumes a single event queue, so
//! a backtest and a live connector look identical from its side.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use logging::init_logging;

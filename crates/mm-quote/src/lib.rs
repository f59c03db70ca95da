//! Quote generation for the market-making engine.
//!
//! Provides the pricing side of the system:
//! - `RollingStats`: fixed-capacity sample window (mean/variance/trend)
//! - `VwapTracker`: volume-weighted fair-price estimator
//! - `LiquidityModel`: pluggable market-depth / arrival-intensity strategy
//! - `TrendQuoter`: Avellaneda-Stoikov quoting with an optional trend term
//!
//! # Architecture
//!
//! ```text
//! book update → TrendQuoter.update_mid()
//!                ├─ mid, spread-in-ticks
//!                └─ RollingStats: window of mid increments
//! quote(q)    → LiquidityModel (A, k) + window variance → bid/ask
//! ```

pub mod config;
pub mod error;
pub mod fair_price;
pub mod liquidity;
pub mod model;
pub mod rolling;

pub use config::{LiquidityConfig, QuoterConfig};
pub use error::{QuoteError, QuoteResult};
pub use fair_price::VwapTracker;
pub use liquidity::{FixedLiquidity, LiquidityModel, SpreadAdaptiveLiquidity};
pub use model::{QuotePair, TrendQuoter};
pub use rolling::RollingStats;

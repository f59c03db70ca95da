//! Quoter configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, QuoteResult};
use crate::liquidity::{FixedLiquidity, LiquidityModel, SpreadAdaptiveLiquidity};

/// Liquidity parameter strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum LiquidityConfig {
    /// Fixed market depth and arrival intensity.
    Fixed {
        #[serde(default = "default_depth")]
        depth: f64,
        #[serde(default = "default_intensity")]
        intensity: f64,
    },
    /// Fixed depth, arrival intensity derived from the current spread
    /// (`k = 2 / spread_ticks`).
    #[serde(rename = "spread_adaptive")]
    SpreadAdaptive {
        #[serde(default = "default_depth")]
        depth: f64,
    },
}

impl Default for LiquidityConfig {
    fn default() -> Self {
        Self::SpreadAdaptive {
            depth: default_depth(),
        }
    }
}

impl LiquidityConfig {
    /// Build the strategy object used by the quoter.
    pub fn build(&self) -> Box<dyn LiquidityModel + Send> {
        match *self {
            Self::Fixed { depth, intensity } => Box::new(FixedLiquidity { depth, intensity }),
            Self::SpreadAdaptive { depth } => Box::new(SpreadAdaptiveLiquidity { depth }),
        }
    }

    fn validate(&self) -> QuoteResult<()> {
        match *self {
            Self::Fixed { depth, intensity } => {
                if !(depth.is_finite() && depth > 0.0) {
                    return Err(QuoteError::InvalidConfig(format!(
                        "market depth must be positive, got {depth}"
                    )));
                }
                if !(intensity.is_finite() && intensity > 0.0) {
                    return Err(QuoteError::InvalidConfig(format!(
                        "arrival intensity must be positive, got {intensity}"
                    )));
                }
            }
            Self::SpreadAdaptive { depth } => {
                if !(depth.is_finite() && depth > 0.0) {
                    return Err(QuoteError::InvalidConfig(format!(
                        "market depth must be positive, got {depth}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Quoter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoterConfig {
    /// Inventory risk aversion. Higher values skew quotes harder against
    /// accumulated inventory.
    #[serde(default = "default_gamma")]
    pub gamma: f64,

    /// Minimum price increment; quotes are snapped to its multiples.
    #[serde(default = "default_tick_size")]
    pub tick_size: Decimal,

    /// Rolling window length for mid-price increments.
    #[serde(default = "default_lookback")]
    pub lookback: usize,

    /// Time step between consecutive mids, used to scale increments.
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// Liquidity parameter strategy.
    #[serde(default)]
    pub liquidity: LiquidityConfig,
}

impl Default for QuoterConfig {
    fn default() -> Self {
        Self {
            gamma: default_gamma(),
            tick_size: default_tick_size(),
            lookback: default_lookback(),
            dt: default_dt(),
            liquidity: LiquidityConfig::default(),
        }
    }
}

impl QuoterConfig {
    pub fn validate(&self) -> QuoteResult<()> {
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(QuoteError::InvalidConfig(format!(
                "gamma must be positive, got {}",
                self.gamma
            )));
        }
        if self.tick_size <= Decimal::ZERO {
            return Err(QuoteError::InvalidConfig(format!(
                "tick_size must be positive, got {}",
                self.tick_size
            )));
        }
        if self.lookback == 0 {
            return Err(QuoteError::InvalidConfig(
                "lookback must be at least 1".to_string(),
            ));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(QuoteError::InvalidConfig(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        self.liquidity.validate()
    }
}

fn default_gamma() -> f64 {
    0.9
}
fn default_tick_size() -> Decimal {
    Decimal::new(1, 2) // 0.01
}
fn default_lookback() -> usize {
    20
}
fn default_dt() -> f64 {
    1.0
}
fn default_depth() -> f64 {
    0.9
}
fn default_intensity() -> f64 {
    0.9
}

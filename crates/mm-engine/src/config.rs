//! Engine configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Market-making engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Quantity per quoted order.
    #[serde(default = "default_quantity")]
    pub quantity: Decimal,

    /// Order lifetime in milliseconds. Expiry is checked opportunistically
    /// on book updates, so an order may outlive this by one update
    /// interval.
    #[serde(default = "default_expiry_ms")]
    pub expiry_ms: u64,

    /// Commission rate per fill (e.g. 0.001 = 10 bps), applied to both the
    /// main and the hedge leg.
    #[serde(default = "default_commission_rate")]
    pub commission_rate: Decimal,

    /// Offset every fill with an opposite position in the hedge
    /// instrument, executed at the fair-price estimate.
    #[serde(default = "default_true")]
    pub hedge_enabled: bool,

    /// Immediately fill a fresh order whose price crosses the opposite
    /// best (simulated marketable order). Off by default: fills normally
    /// come from trade-print matching only.
    #[serde(default)]
    pub fill_on_cross: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quantity: default_quantity(),
            expiry_ms: default_expiry_ms(),
            commission_rate: default_commission_rate(),
            hedge_enabled: true,
            fill_on_cross: false,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.quantity <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig(format!(
                "quantity must be positive, got {}",
                self.quantity
            )));
        }
        if self.expiry_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "expiry_ms must be positive".to_string(),
            ));
        }
        if self.commission_rate < Decimal::ZERO {
            return Err(EngineError::InvalidConfig(format!(
                "commission_rate must not be negative, got {}",
                self.commission_rate
            )));
        }
        Ok(())
    }
}

fn default_quantity() -> Decimal {
    Decimal::ONE
}
fn default_expiry_ms() -> u64 {
    1_000
}
fn default_commission_rate() -> Decimal {
    Decimal::new(1, 3) // 0.001 = 10 bps
}
fn default_true() -> bool {
    true
}

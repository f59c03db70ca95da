//! Volume-weighted fair-price estimation from trade prints.

use rust_decimal::Decimal;

use mm_core::{Price, Qty};

/// Running volume-weighted average of trade prices.
///
/// Accumulates Σ(price·quantity) and Σquantity exactly in decimal; the
/// estimate is undefined until the first positive-volume print arrives.
/// The hedge-enabled engine uses this estimate as the hedge execution price.
#[derive(Debug, Clone, Default)]
pub struct VwapTracker {
    notional: Decimal,
    volume: Decimal,
}

impl VwapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a trade print. Non-positive quantities are ignored.
    pub fn record(&mut self, price: Price, quantity: Qty) {
        if !quantity.is_positive() {
            return;
        }
        self.notional += price.notional(quantity);
        self.volume += quantity.inner();
    }

    /// True once any volume has been observed.
    pub fn is_ready(&self) -> bool {
        !self.volume.is_zero()
    }

    /// Current estimate, `None` until the first print.
    pub fn vwap(&self) -> Option<Price> {
        if self.volume.is_zero() {
            return None;
        }
        Some(Price::new(self.notional / self.volume))
    }

    /// Total volume observed so far.
    pub fn volume(&self) -> Qty {
        Qty::new(self.volume)
    }
}

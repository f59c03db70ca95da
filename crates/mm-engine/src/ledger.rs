//! Cash, inventory, and hedge accounting.

use rust_decimal::Decimal;

use mm_core::{Price, Qty, Side};

/// The engine's accounting state. Mutated only through fills.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    cash: Decimal,
    inventory: Decimal,
    hedge_inventory: Decimal,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    pub fn inventory(&self) -> Decimal {
        self.inventory
    }

    pub fn hedge_inventory(&self) -> Decimal {
        self.hedge_inventory
    }

    /// Apply a fill on the main instrument.
    ///
    /// Buys debit `quantity·limit·(1+commission)`; sells credit
    /// `quantity·limit·(1−commission)`.
    pub fn apply_fill(&mut self, side: Side, quantity: Qty, limit: Price, commission: Decimal) {
        let notional = limit.notional(quantity);
        match side {
            Side::Buy => {
                self.inventory += quantity.inner();
                self.cash -= notional * (Decimal::ONE + commission);
            }
            Side::Sell => {
                self.inventory -= quantity.inner();
                self.cash += notional * (Decimal::ONE - commission);
            }
        }
    }

    /// Apply the offsetting hedge leg for a fill of `main_side`.
    ///
    /// The hedge executes the opposite direction at `hedge_price` for the
    /// same notional, with the commission applied symmetrically.
    pub fn apply_hedge(
        &mut self,
        main_side: Side,
        notional: Decimal,
        hedge_price: Price,
        commission: Decimal,
    ) {
        let hedge_quantity = notional / hedge_price.inner();
        match main_side {
            Side::Buy => {
                // Main bought → hedge sells
                self.hedge_inventory -= hedge_quantity;
                self.cash += notional * (Decimal::ONE - commission);
            }
            Side::Sell => {
                // Main sold → hedge buys
                self.hedge_inventory += hedge_quantity;
                self.cash -= notional * (Decimal::ONE + commission);
            }
        }
    }

    /// Mark-to-market equity: `inventory·mid + hedge_inventory·hedge_price
    /// + cash`, with unknown prices valued at zero.
    pub fn equity(&self, mid: Option<Price>, hedge_price: Option<Price>) -> Decimal {
        let mid = mid.map(|p| p.inner()).unwrap_or_default();
        let hedge = hedge_price.map(|p| p.inner()).unwrap_or_default();
        self.inventory * mid + self.hedge_inventory * hedge + self.cash
    }
}

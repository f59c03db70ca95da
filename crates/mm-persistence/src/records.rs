//! Record shapes for the four CSV logs.
//!
//! Row formatting and parsing live together so the replay driver reads
//! exactly what the recorder writes.

use rust_decimal::Decimal;

use mm_core::{OrderEvent, Price, Qty};

use crate::error::{PersistenceError, PersistenceResult};

/// Orders log header: one row per order state transition.
pub const ORDERS_HEADER: &str = "time,id,action,limit,quantity,side";

/// Format an order transition as an orders-log row.
pub fn order_row(event: &OrderEvent) -> String {
    format!(
        "{},{},{},{},{},{}",
        event.time_ms, event.id, event.action, event.limit, event.quantity, event.side
    )
}

/// Engine-state log record: accounting snapshot per quoting cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRecord {
    pub time_ms: u64,
    pub cash: Decimal,
    pub inventory: Decimal,
    pub hedge_inventory: Decimal,
    pub equity: Decimal,
    pub mid_price: Decimal,
    pub fair_price: Decimal,
}

impl StateRecord {
    pub const HEADER: &'static str =
        "time,cash,inventory,hedge_inventory,equity,mid_price,fair_price";

    pub fn to_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.time_ms,
            self.cash,
            self.inventory,
            self.hedge_inventory,
            self.equity,
            self.mid_price,
            self.fair_price
        )
    }
}

/// Order-book log record: best bid/ask after an applied snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub time_ms: u64,
    pub best_bid: Price,
    pub best_ask: Price,
}

impl BookRecord {
    pub const HEADER: &'static str = "time,best_bid,best_ask";

    pub fn to_row(&self) -> String {
        format!("{},{},{}", self.time_ms, self.best_bid, self.best_ask)
    }

    pub fn parse(line: &str) -> PersistenceResult<Self> {
        let mut fields = line.split(',');
        let time_ms = next_field(&mut fields, line)?
            .parse::<u64>()
            .map_err(|e| PersistenceError::Malformed(format!("bad time in {line:?}: {e}")))?;
        let best_bid: Price = next_field(&mut fields, line)?.parse()?;
        let best_ask: Price = next_field(&mut fields, line)?.parse()?;
        Ok(Self {
            time_ms,
            best_bid,
            best_ask,
        })
    }
}

/// Trade log record: one row per trade print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRecord {
    pub time_ms: u64,
    pub price: Price,
    pub quantity: Qty,
}

impl TradeRecord {
    pub const HEADER: &'static str = "time,price,quantity";

    pub fn to_row(&self) -> String {
        format!("{},{},{}", self.time_ms, self.price, self.quantity)
    }

    pub fn parse(line: &str) -> PersistenceResult<Self> {
        let mut fields = line.split(',');
        let time_ms = next_field(&mut fields, line)?
            .parse::<u64>()
            .map_err(|e| PersistenceError::Malformed(format!("bad time in {line:?}: {e}")))?;
        let price: Price = next_field(&mut fields, line)?.parse()?;
        let quantity: Qty = next_field(&mut fields, line)?.parse()?;
        Ok(Self {
            time_ms,
            price,
            quantity,
        })
    }
}

fn next_field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    line: &str,
) -> PersistenceResult<&'a str> {
    fields
        .next()
        .ok_or_else(|| PersistenceError::Malformed(format!("missing field in {line:?}")))
}

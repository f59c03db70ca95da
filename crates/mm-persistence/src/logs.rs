//! Owned log sinks: engine logs and the market recorder.

use std::path::Path;

use mm_core::OrderEvent;
use mm_feed::{FeedEvent, OrderBook};

use crate::error::PersistenceResult;
use crate::records::{order_row, BookRecord, StateRecord, TradeRecord, ORDERS_HEADER};
use crate::writer::CsvWriter;

/// The engine's own sinks: orders audit log and engine-state log.
///
/// Opened at engine construction, flushed per write, released on drop.
#[derive(Debug)]
pub struct EngineLogs {
    orders: CsvWriter,
    state: CsvWriter,
}

impl EngineLogs {
    /// Open `orders.csv` and `state.csv` under `dir`.
    pub fn open(dir: impl AsRef<Path>) -> PersistenceResult<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            orders: CsvWriter::create(dir.join("orders.csv"), ORDERS_HEADER)?,
            state: CsvWriter::create(dir.join("state.csv"), StateRecord::HEADER)?,
        })
    }

    /// Append one order transition to the audit log.
    pub fn append_order(&mut self, event: &OrderEvent) -> PersistenceResult<()> {
        self.orders.write_row(&order_row(event))
    }

    /// Append one accounting snapshot to the state log.
    pub fn append_state(&mut self, record: &StateRecord) -> PersistenceResult<()> {
        self.state.write_row(&record.to_row())
    }
}

/// Records the market data side: order-book log and trade log.
///
/// Keeps its own book state so it can be driven by the same feed events as
/// the engine without sharing state with it.
#[derive(Debug)]
pub struct MarketRecorder {
    book_log: CsvWriter,
    trade_log: CsvWriter,
    book: OrderBook,
}

impl MarketRecorder {
    /// Open `orderbook.csv` and `market.csv` under `dir`.
    pub fn open(dir: impl AsRef<Path>) -> PersistenceResult<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            book_log: CsvWriter::create(dir.join("orderbook.csv"), BookRecord::HEADER)?,
            trade_log: CsvWriter::create(dir.join("market.csv"), TradeRecord::HEADER)?,
            book: OrderBook::new(),
        })
    }

    /// Record one feed event.
    ///
    /// Depth snapshots are logged once applied and both sides are present;
    /// stale snapshots leave no row.
    pub fn on_event(&mut self, event: &FeedEvent) -> PersistenceResult<()> {
        match event {
            FeedEvent::Depth(snapshot) => {
                if !self.book.apply(snapshot) {
                    return Ok(());
                }
                if let Some((best_bid, best_ask)) = self.book.bbo() {
                    let record = BookRecord {
                        time_ms: snapshot.time_ms,
                        best_bid,
                        best_ask,
                    };
                    self.book_log.write_row(&record.to_row())?;
                }
                Ok(())
            }
            FeedEvent::Trade(print) => {
                let record = TradeRecord {
                    time_ms: print.time_ms,
                    price: print.price,
                    quantity: print.quantity,
                };
                self.trade_log.write_row(&record.to_row())
            }
        }
    }
}

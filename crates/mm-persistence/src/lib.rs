//! Append-only CSV persistence.
//!
//! Four log files, each a header row followed by one row per event,
//! flushed on every write:
//! - orders log: every order state transition
//! - engine-state log: accounting snapshot per quoting cycle
//! - order-book log: best bid/ask per applied snapshot
//! - trade log: every trade print
//!
//! A write failure is fatal to the process; there is no partial-log
//! recovery.

pub mod error;
pub mod logs;
pub mod records;
pub mod writer;

pub use error::{PersistenceError, PersistenceResult};
pub use logs::{EngineLogs, MarketRecorder};
pub use records::{order_row, BookRecord, StateRecord, TradeRecord, ORDERS_HEADER};
pub use writer::CsvWriter;

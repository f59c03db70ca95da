//! Event-time-ordered replay of recorded logs.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use mm_feed::{DepthSnapshot, FeedEvent, TradePrint};
use mm_persistence::{BookRecord, TradeRecord};

use crate::error::ReplayResult;

/// Replay source built from an order-book log and a trade log.
///
/// Book rows become single-level depth snapshots with synthetic increasing
/// sequence ids; trade rows become prints. The merge is stable by event
/// time, with trades delivered before book updates at equal timestamps.
#[derive(Debug)]
pub struct ReplaySource {
    events: Vec<FeedEvent>,
}

impl ReplaySource {
    /// Read `orderbook.csv` and `market.csv` from a recording directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> ReplayResult<Self> {
        let dir = dir.as_ref();
        Self::from_files(dir.join("orderbook.csv"), dir.join("market.csv"))
    }

    /// Read the two logs from explicit paths.
    pub fn from_files(
        book_path: impl AsRef<Path>,
        trade_path: impl AsRef<Path>,
    ) -> ReplayResult<Self> {
        let mut events: Vec<(u64, u8, FeedEvent)> = Vec::new();

        for (seq, line) in data_lines(book_path.as_ref())?.into_iter().enumerate() {
            let record = BookRecord::parse(&line)?;
            let snapshot = DepthSnapshot::top_of_book(
                seq as u64 + 1,
                record.time_ms,
                record.best_bid,
                record.best_ask,
            );
            events.push((record.time_ms, 1, FeedEvent::Depth(snapshot)));
        }

        for line in data_lines(trade_path.as_ref())? {
            let record = TradeRecord::parse(&line)?;
            let print = TradePrint {
                time_ms: record.time_ms,
                price: record.price,
                quantity: record.quantity,
            };
            events.push((record.time_ms, 0, FeedEvent::Trade(print)));
        }

        // Stable by (time, kind): per-log order is preserved, trades come
        // first on timestamp ties.
        events.sort_by_key(|(time_ms, kind, _)| (*time_ms, *kind));

        info!(
            events = events.len(),
            book_log = %book_path.as_ref().display(),
            trade_log = %trade_path.as_ref().display(),
            "loaded replay events"
        );

        Ok(Self {
            events: events.into_iter().map(|(_, _, event)| event).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[FeedEvent] {
        &self.events
    }

    /// Consume the source, yielding events in delivery order.
    pub fn into_events(self) -> Vec<FeedEvent> {
        self.events
    }
}

/// Read a CSV log, skipping the header row and blank lines.
fn data_lines(path: &Path) -> ReplayResult<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if idx == 0 || line.trim().is_empty() {
            continue;
        }
        lines.push(line);
    }
    Ok(lines)
}

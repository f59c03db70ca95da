//! Best bid/ask tracking from full depth snapshots.

use std::collections::BTreeMap;

use tracing::debug;

use mm_core::{Price, Qty};

use crate::events::DepthSnapshot;

/// Order-book state rebuilt from the latest full depth snapshot.
///
/// Each snapshot replaces the whole price→size mapping per side. Best bid
/// is the highest bid key, best ask the lowest ask key. Snapshots whose
/// sequence id is not strictly greater than the last applied one are
/// dropped.
#[derive(Debug, Default)]
pub struct OrderBook {
    bids: BTreeMap<Price, Qty>,
    asks: BTreeMap<Price, Qty>,
    last_seq: Option<u64>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a full snapshot. Returns false (and leaves state untouched)
    /// when the snapshot is stale.
    pub fn apply(&mut self, snapshot: &DepthSnapshot) -> bool {
        if let Some(last) = self.last_seq {
            if snapshot.seq <= last {
                debug!(
                    seq = snapshot.seq,
                    last_seq = last,
                    "dropping stale depth snapshot"
                );
                return false;
            }
        }

        self.bids.clear();
        self.asks.clear();
        for &(price, size) in &snapshot.bids {
            if size.is_positive() {
                self.bids.insert(price, size);
            }
        }
        for &(price, size) in &snapshot.asks {
            if size.is_positive() {
                self.asks.insert(price, size);
            }
        }
        self.last_seq = Some(snapshot.seq);
        true
    }

    /// Highest bid price.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    /// Lowest ask price.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// Both best prices, once each side has at least one level.
    pub fn bbo(&self) -> Option<(Price, Price)> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid, ask)),
            _ => None,
        }
    }

    /// Sequence id of the last applied snapshot.
    pub fn last_seq(&self) -> Option<u64> {
        self.last_seq
    }
}

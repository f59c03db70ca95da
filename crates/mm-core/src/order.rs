//! Order state machine and its audit trail.
//!
//! An order is created `Pending`, advances to `Submitted` immediately, and
//! ends `Filled` or `Canceled`. Both terminal states absorb further
//! transitions as no-ops. Every real transition yields an `OrderEvent`
//! that the owner appends to the orders log; a `None` return means
//! nothing happened and nothing is logged.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::{Price, Qty};

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Returns the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Returns 1 for buy, -1 for sell (for position calculations).
    pub fn sign(&self) -> i8 {
        match self {
            Self::Buy => 1,
            Self::Sell => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Engine-assigned order identifier, unique and monotonically increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl OrderId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State of an order in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Created but not yet submitted.
    Pending,
    /// Resting in the market, eligible for fills and cancels.
    Submitted,
    /// Completely filled. Terminal.
    Filled,
    /// Canceled. Terminal.
    Canceled,
}

impl OrderStatus {
    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Filled | Self::Canceled)
    }
}

/// Audit action recorded on each order transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderAction {
    Submit,
    Cancel,
    Fill,
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit => write!(f, "SUBMIT"),
            Self::Cancel => write!(f, "CANCEL"),
            Self::Fill => write!(f, "FILL"),
        }
    }
}

/// Immutable audit record of a single order transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEvent {
    pub time_ms: u64,
    pub id: OrderId,
    pub action: OrderAction,
    pub limit: Price,
    pub quantity: Qty,
    pub side: Side,
}

/// A single limit order and its lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub quantity: Qty,
    pub limit: Price,
    /// Expiry timestamp (Unix milliseconds). Checked opportunistically.
    pub expires_at_ms: u64,
    status: OrderStatus,
}

impl Order {
    /// Create a new order in `Pending` state.
    pub fn new(id: OrderId, side: Side, quantity: Qty, limit: Price, expires_at_ms: u64) -> Self {
        Self {
            id,
            side,
            quantity,
            limit,
            expires_at_ms,
            status: OrderStatus::Pending,
        }
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns true if the order is resting and eligible for fills.
    pub fn is_submitted(&self) -> bool {
        self.status == OrderStatus::Submitted
    }

    /// Returns true if the nominal expiry has passed.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.expires_at_ms < now_ms
    }

    /// Pending → Submitted. No-op from any other state.
    pub fn submit(&mut self, now_ms: u64) -> Option<OrderEvent> {
        if self.status != OrderStatus::Pending {
            return None;
        }
        self.status = OrderStatus::Submitted;
        Some(self.event(OrderAction::Submit, now_ms))
    }

    /// Transition to Canceled. No-op once terminal.
    pub fn cancel(&mut self, now_ms: u64) -> Option<OrderEvent> {
        if self.status.is_terminal() {
            return None;
        }
        self.status = OrderStatus::Canceled;
        Some(self.event(OrderAction::Cancel, now_ms))
    }

    /// Transition to Filled. No-op once terminal.
    pub fn fill(&mut self, now_ms: u64) -> Option<OrderEvent> {
        if self.status.is_terminal() {
            return None;
        }
        self.status = OrderStatus::Filled;
        Some(self.event(OrderAction::Fill, now_ms))
    }

    fn event(&self, action: OrderAction, time_ms: u64) -> OrderEvent {
        OrderEvent {
            time_ms,
            id: self.id,
            action,
            limit: self.limit,
            quantity: self.quantity,
            side: self.side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_order() -> Order {
        Order::new(
            OrderId::new(1),
            Side::Buy,
            Qty::new(dec!(1)),
            Price::new(dec!(100)),
            5_000,
        )
    }

    #[test]
    fn test_side_opposite_and_sign() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
        assert_eq!(Side::Buy.sign(), 1);
        assert_eq!(Side::Sell.sign(), -1);
    }

    #[test]
    fn test_submit_from_pending() {
        let mut order = sample_order();
        assert_eq!(order.status(), OrderStatus::Pending);

        let event = order.submit(1_000).expect("submit should transition");
        assert_eq!(order.status(), OrderStatus::Submitted);
        assert_eq!(event.action, OrderAction::Submit);
        assert_eq!(event.time_ms, 1_000);
        assert_eq!(event.id, OrderId::new(1));

        // Second submit is a no-op
        assert!(order.submit(1_001).is_none());
    }

    #[test]
    fn test_cancel_then_fill_stays_canceled() {
        let mut order = sample_order();
        order.submit(1_000);

        assert!(order.cancel(2_000).is_some());
        assert_eq!(order.status(), OrderStatus::Canceled);

        assert!(order.fill(3_000).is_none());
        assert_eq!(order.status(), OrderStatus::Canceled);
    }

    #[test]
    fn test_fill_then_cancel_stays_filled() {
        let mut order = sample_order();
        order.submit(1_000);

        assert!(order.fill(2_000).is_some());
        assert_eq!(order.status(), OrderStatus::Filled);

        assert!(order.cancel(3_000).is_none());
        assert_eq!(order.status(), OrderStatus::Filled);
    }

    #[test]
    fn test_double_cancel_single_event() {
        let mut order = sample_order();
        order.submit(1_000);

        assert!(order.cancel(2_000).is_some());
        assert!(order.cancel(2_001).is_none());
    }

    #[test]
    fn test_expiry_check() {
        let order = sample_order();
        assert!(!order.is_expired(4_999));
        assert!(!order.is_expired(5_000));
        assert!(order.is_expired(5_001));
    }

    #[test]
    fn test_event_carries_order_fields() {
        let mut order = sample_order();
        let event = order.submit(500).unwrap();
        assert_eq!(event.limit, Price::new(dec!(100)));
        assert_eq!(event.quantity, Qty::new(dec!(1)));
        assert_eq!(event.side, Side::Buy);
    }
}

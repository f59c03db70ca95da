//! Core domain types for the market-making engine.
//!
//! This crate provides the fundamental types shared by every other crate:
//! - `Price`, `Qty`: precision-safe decimal wrappers
//! - `Side`: order side with sign/opposite helpers
//! - `Order`: the order state machine with its audit events

pub mod decimal;
pub mod order;

pub use decimal::{Price, Qty};
pub use order::{Order, OrderAction, OrderEvent, OrderId, OrderStatus, Side};

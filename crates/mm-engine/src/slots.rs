//! Fixed two-slot order holder, one slot per side.

use mm_core::{Order, Side};

/// The engine's resting orders: at most one per side.
///
/// A new order displaces whatever occupied its side's slot; the engine
/// cancels the old order before placing the replacement.
#[derive(Debug, Default)]
pub struct OrderSlots {
    buy: Option<Order>,
    sell: Option<Order>,
}

impl OrderSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side) -> Option<&Order> {
        match side {
            Side::Buy => self.buy.as_ref(),
            Side::Sell => self.sell.as_ref(),
        }
    }

    pub fn get_mut(&mut self, side: Side) -> Option<&mut Order> {
        match side {
            Side::Buy => self.buy.as_mut(),
            Side::Sell => self.sell.as_mut(),
        }
    }

    /// Place an order into its side's slot, returning the displaced one.
    pub fn put(&mut self, order: Order) -> Option<Order> {
        match order.side {
            Side::Buy => self.buy.replace(order),
            Side::Sell => self.sell.replace(order),
        }
    }

    /// True when both slots hold a currently submitted order.
    pub fn both_submitted(&self) -> bool {
        self.buy.as_ref().is_some_and(|o| o.is_submitted())
            && self.sell.as_ref().is_some_and(|o| o.is_submitted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mm_core::{OrderId, Price, Qty};
    use rust_decimal_macros::dec;

    fn order(id: u64, side: Side) -> Order {
        Order::new(
            OrderId::new(id),
            side,
            Qty::new(dec!(1)),
            Price::new(dec!(100)),
            1_000,
        )
    }

    #[test]
    fn test_put_and_get_per_side() {
        let mut slots = OrderSlots::new();
        assert!(slots.get(Side::Buy).is_none());

        slots.put(order(1, Side::Buy));
        slots.put(order(2, Side::Sell));

        assert_eq!(slots.get(Side::Buy).unwrap().id, OrderId::new(1));
        assert_eq!(slots.get(Side::Sell).unwrap().id, OrderId::new(2));
    }

    #[test]
    fn test_put_displaces_same_side() {
        let mut slots = OrderSlots::new();
        slots.put(order(1, Side::Buy));
        let displaced = slots.put(order(3, Side::Buy)).unwrap();

        assert_eq!(displaced.id, OrderId::new(1));
        assert_eq!(slots.get(Side::Buy).unwrap().id, OrderId::new(3));
    }

    #[test]
    fn test_both_submitted() {
        let mut slots = OrderSlots::new();
        assert!(!slots.both_submitted());

        let mut buy = order(1, Side::Buy);
        buy.submit(0);
        slots.put(buy);
        assert!(!slots.both_submitted());

        let mut sell = order(2, Side::Sell);
        sell.submit(0);
        slots.put(sell);
        assert!(slots.both_submitted());

        slots.get_mut(Side::Sell).unwrap().cancel(1);
        assert!(!slots.both_submitted());
    }
}

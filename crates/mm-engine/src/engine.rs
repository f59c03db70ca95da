//! Event-driven market-making orchestration.

use rust_decimal::Decimal;
use tracing::{debug, error, info};

use mm_core::{Order, OrderId, Price, Qty, Side};
use mm_feed::{DepthSnapshot, FeedEvent, OrderBook, TradePrint};
use mm_persistence::{EngineLogs, StateRecord};
use mm_quote::{QuotePair, TrendQuoter, VwapTracker};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::ledger::Ledger;
use crate::slots::OrderSlots;

/// Single-instrument market maker.
///
/// Owns the book, the quoter, the fair-price estimator, both order slots,
/// and the accounting ledger. Consumes feed events one at a time; each
/// handler finishes all state mutation and logging before returning.
pub struct MarketMakerEngine {
    config: EngineConfig,
    book: OrderBook,
    quoter: TrendQuoter,
    fair_price: VwapTracker,
    slots: OrderSlots,
    ledger: Ledger,
    logs: EngineLogs,
    next_order_id: u64,
    /// Event-time clock: the latest event timestamp seen.
    clock_ms: u64,
}

impl MarketMakerEngine {
    pub fn new(config: EngineConfig, quoter: TrendQuoter, logs: EngineLogs) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            book: OrderBook::new(),
            quoter,
            fair_price: VwapTracker::new(),
            slots: OrderSlots::new(),
            ledger: Ledger::new(),
            logs,
            next_order_id: 0,
            clock_ms: 0,
        })
    }

    /// Dispatch one feed event.
    pub fn on_event(&mut self, event: &FeedEvent) -> EngineResult<()> {
        match event {
            FeedEvent::Depth(snapshot) => self.on_book_update(snapshot),
            FeedEvent::Trade(print) => self.on_trade_update(print),
        }
    }

    /// Handle an order-book snapshot.
    fn on_book_update(&mut self, snapshot: &DepthSnapshot) -> EngineResult<()> {
        if !self.book.apply(snapshot) {
            return Ok(());
        }
        self.clock_ms = self.clock_ms.max(snapshot.time_ms);

        let (best_bid, best_ask) = match self.book.bbo() {
            Some(bbo) => bbo,
            None => return Ok(()),
        };
        self.quoter.update_mid(best_bid, best_ask, snapshot.time_ms);

        if !self.fair_price.is_ready() || !self.quoter.is_ready() {
            return Ok(());
        }

        self.write_state()?;
        self.check_expiry()?;

        if self.slots.both_submitted() {
            return Ok(());
        }
        self.requote()
    }

    /// Handle a trade print: update the fair-price estimate, then fill any
    /// resting order the print makes marketable.
    fn on_trade_update(&mut self, print: &TradePrint) -> EngineResult<()> {
        self.clock_ms = self.clock_ms.max(print.time_ms);
        self.fair_price.record(print.price, print.quantity);

        for side in [Side::Buy, Side::Sell] {
            // Read the slot at decision time: a concurrent cancel earlier in
            // the queue has already landed by now.
            let marketable = match self.slots.get(side) {
                Some(order) if order.is_submitted() => match side {
                    Side::Buy => order.limit >= print.price,
                    Side::Sell => order.limit <= print.price,
                },
                _ => false,
            };
            if marketable {
                self.fill_slot(side)?;
            }
        }
        Ok(())
    }

    /// Cancel any resting order whose expiry has passed. Best-effort: runs
    /// only when a book update arrives.
    fn check_expiry(&mut self) -> EngineResult<()> {
        let now = self.clock_ms;
        for side in [Side::Buy, Side::Sell] {
            let event = match self.slots.get_mut(side) {
                Some(order) if order.is_submitted() && order.is_expired(now) => {
                    debug!(id = %order.id, %side, "order expired");
                    order.cancel(now)
                }
                _ => None,
            };
            if let Some(event) = event {
                self.logs.append_order(&event)?;
            }
        }
        Ok(())
    }

    /// Recompute the quote at current inventory and refresh both sides.
    fn requote(&mut self) -> EngineResult<()> {
        let pair = match self
            .quoter
            .quote(self.ledger.inventory(), None, None)
        {
            Ok(Some(pair)) => pair,
            Ok(None) => return Ok(()),
            Err(e) => {
                error!(?e, "quote computation failed, aborting cycle");
                return Err(e.into());
            }
        };

        self.requote_side(Side::Buy, &pair)?;
        self.requote_side(Side::Sell, &pair)
    }

    /// Refresh one side against a freshly computed quote.
    ///
    /// A submitted order already resting at the new limit is left alone;
    /// anything else is canceled and replaced.
    fn requote_side(&mut self, side: Side, pair: &QuotePair) -> EngineResult<()> {
        let limit = match side {
            Side::Buy => pair.bid,
            Side::Sell => pair.ask,
        };

        if let Some(order) = self.slots.get(side) {
            if order.is_submitted() && order.limit == limit {
                return Ok(());
            }
        }

        if let Some(order) = self.slots.get_mut(side) {
            if let Some(event) = order.cancel(self.clock_ms) {
                self.logs.append_order(&event)?;
            }
        }

        let id = OrderId::new(self.next_order_id);
        self.next_order_id += 1;
        let mut order = Order::new(
            id,
            side,
            Qty::new(self.config.quantity),
            limit,
            self.clock_ms + self.config.expiry_ms,
        );
        if let Some(event) = order.submit(self.clock_ms) {
            self.logs.append_order(&event)?;
        }
        debug!(%id, %side, %limit, "order submitted");
        self.slots.put(order);

        if self.config.fill_on_cross && self.crosses_opposite_best(side, limit) {
            self.fill_slot(side)?;
        }
        Ok(())
    }

    /// True when `limit` crosses the opposite best price (a marketable
    /// order in the simulated-fill variant).
    fn crosses_opposite_best(&self, side: Side, limit: Price) -> bool {
        match side {
            Side::Buy => self.book.best_ask().is_some_and(|ask| limit >= ask),
            Side::Sell => self.book.best_bid().is_some_and(|bid| limit <= bid),
        }
    }

    /// Fill the resting order on `side` and settle the accounting, plus
    /// the offsetting hedge leg when enabled.
    fn fill_slot(&mut self, side: Side) -> EngineResult<()> {
        let now = self.clock_ms;
        let (event, quantity, limit) = match self.slots.get_mut(side) {
            Some(order) if order.is_submitted() => match order.fill(now) {
                Some(event) => (event, order.quantity, order.limit),
                None => return Ok(()),
            },
            _ => return Ok(()),
        };
        self.logs.append_order(&event)?;

        self.ledger
            .apply_fill(side, quantity, limit, self.config.commission_rate);

        if self.config.hedge_enabled {
            match self.fair_price.vwap() {
                Some(hedge_price) if hedge_price.is_positive() => {
                    self.ledger.apply_hedge(
                        side,
                        limit.notional(quantity),
                        hedge_price,
                        self.config.commission_rate,
                    );
                }
                _ => debug!(%side, "no hedge price yet, skipping hedge leg"),
            }
        }

        info!(
            id = %event.id,
            %side,
            %limit,
            %quantity,
            inventory = %self.ledger.inventory(),
            cash = %self.ledger.cash(),
            "order filled"
        );
        Ok(())
    }

    /// Append the current accounting snapshot to the state log.
    fn write_state(&mut self) -> EngineResult<()> {
        let mid = self.quoter.mid();
        let fair = self.fair_price.vwap();
        let record = StateRecord {
            time_ms: self.clock_ms,
            cash: self.ledger.cash(),
            inventory: self.ledger.inventory(),
            hedge_inventory: self.ledger.hedge_inventory(),
            equity: self.ledger.equity(mid, fair),
            mid_price: mid.map(|p| p.inner()).unwrap_or_default(),
            fair_price: fair.map(|p| p.inner()).unwrap_or_default(),
        };
        self.logs.append_state(&record)?;
        Ok(())
    }

    /// Mark-to-market equity. Changes only through fills.
    pub fn equity(&self) -> Decimal {
        self.ledger.equity(self.quoter.mid(), self.fair_price.vwap())
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn slots(&self) -> &OrderSlots {
        &self.slots
    }

    pub fn quoter(&self) -> &TrendQuoter {
        &self.quoter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mm_core::OrderStatus;
    use mm_quote::{LiquidityConfig, QuoterConfig};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    struct Harness {
        engine: MarketMakerEngine,
        _dir: TempDir,
        seq: u64,
    }

    impl Harness {
        fn new(config: EngineConfig) -> Self {
            let dir = TempDir::new().unwrap();
            let quoter_config = QuoterConfig {
                gamma: 0.9,
                tick_size: dec!(0.01),
                lookback: 2,
                dt: 1.0,
                liquidity: LiquidityConfig::Fixed {
                    depth: 0.9,
                    intensity: 0.9,
                },
            };
            let quoter = TrendQuoter::new(&quoter_config).unwrap();
            let logs = EngineLogs::open(dir.path()).unwrap();
            let engine = MarketMakerEngine::new(config, quoter, logs).unwrap();
            Self {
                engine,
                _dir: dir,
                seq: 0,
            }
        }

        fn book(&mut self, time_ms: u64, bid: Decimal, ask: Decimal) {
            self.seq += 1;
            let snap = DepthSnapshot::top_of_book(
                self.seq,
                time_ms,
                Price::new(bid),
                Price::new(ask),
            );
            self.engine.on_event(&FeedEvent::Depth(snap)).unwrap();
        }

        fn trade(&mut self, time_ms: u64, price: Decimal, qty: Decimal) {
            self.engine
                .on_event(&FeedEvent::Trade(TradePrint {
                    time_ms,
                    price: Price::new(price),
                    quantity: Qty::new(qty),
                }))
                .unwrap();
        }

        /// Prime the fair price and fill the increment window so the
        /// engine starts quoting on the third book update.
        ///
        /// Constant book → zero increments, so further identical updates
        /// reproduce the same quote exactly.
        fn warm_up(&mut self) {
            self.trade(0, dec!(100), dec!(1));
            self.book(100, dec!(99.5), dec!(100.5));
            self.book(200, dec!(99.5), dec!(100.5));
            self.book(300, dec!(99.5), dec!(100.5));
        }
    }

    fn no_hedge_config() -> EngineConfig {
        EngineConfig {
            hedge_enabled: false,
            expiry_ms: 1_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_quotes_until_ready() {
        let mut h = Harness::new(no_hedge_config());
        h.trade(0, dec!(100), dec!(1));
        h.book(100, dec!(99.5), dec!(100.5));
        h.book(200, dec!(99.5), dec!(100.5));

        // Window needs 2 increments → first arrives at the second book
        // update, so quoting starts at the third.
        assert!(h.engine.slots().get(Side::Buy).is_none());

        h.book(300, dec!(99.5), dec!(100.5));
        assert!(h.engine.slots().get(Side::Buy).is_some());
        assert!(h.engine.slots().get(Side::Sell).is_some());
    }

    #[test]
    fn test_no_quotes_without_fair_price() {
        let mut h = Harness::new(no_hedge_config());
        // Book updates only, no trade print
        h.book(100, dec!(99.5), dec!(100.5));
        h.book(200, dec!(99.6), dec!(100.6));
        h.book(300, dec!(99.5), dec!(100.5));
        assert!(h.engine.slots().get(Side::Buy).is_none());
    }

    #[test]
    fn test_both_submitted_blocks_requote() {
        let mut h = Harness::new(no_hedge_config());
        h.warm_up();

        let buy_id = h.engine.slots().get(Side::Buy).unwrap().id;
        let sell_id = h.engine.slots().get(Side::Sell).unwrap().id;

        // Prices move, but both orders are still resting → no requote
        h.book(400, dec!(99.8), dec!(100.8));
        assert_eq!(h.engine.slots().get(Side::Buy).unwrap().id, buy_id);
        assert_eq!(h.engine.slots().get(Side::Sell).unwrap().id, sell_id);
    }

    #[test]
    fn test_same_limit_not_resubmitted() {
        let mut h = Harness::new(no_hedge_config());
        h.warm_up();

        let buy = h.engine.slots().get(Side::Buy).unwrap();
        let (buy_id, buy_limit) = (buy.id, buy.limit);

        // Fill the sell side so the next book update requotes...
        let sell_limit = h.engine.slots().get(Side::Sell).unwrap().limit;
        h.trade(350, sell_limit.inner(), dec!(1));
        assert_eq!(
            h.engine.slots().get(Side::Sell).unwrap().status(),
            OrderStatus::Filled
        );

        // ...with the book unchanged the fresh bid equals the resting
        // limit, so the buy order stays put.
        h.book(400, dec!(99.5), dec!(100.5));
        let buy = h.engine.slots().get(Side::Buy).unwrap();
        assert_eq!(buy.id, buy_id);
        assert_eq!(buy.limit, buy_limit);
        // The sell side was replaced with a fresh order
        assert!(h.engine.slots().get(Side::Sell).unwrap().is_submitted());
    }

    #[test]
    fn test_repricing_cancels_and_resubmits() {
        let mut h = Harness::new(no_hedge_config());
        h.warm_up();

        let buy_id = h.engine.slots().get(Side::Buy).unwrap().id;
        let sell_limit = h.engine.slots().get(Side::Sell).unwrap().limit;

        // Open one side, then move the book so the quote changes.
        h.trade(350, sell_limit.inner(), dec!(1));
        h.book(400, dec!(100.5), dec!(101.5));

        let buy = h.engine.slots().get(Side::Buy).unwrap();
        assert_ne!(buy.id, buy_id);
        assert!(buy.is_submitted());
    }

    #[test]
    fn test_trade_fill_updates_accounting() {
        let mut h = Harness::new(no_hedge_config());
        h.warm_up();

        let buy = h.engine.slots().get(Side::Buy).unwrap();
        let limit = buy.limit;

        // A print at the buy limit makes it marketable.
        h.trade(350, limit.inner(), dec!(1));

        assert_eq!(
            h.engine.slots().get(Side::Buy).unwrap().status(),
            OrderStatus::Filled
        );
        assert_eq!(h.engine.ledger().inventory(), dec!(1));
        let expected_cash = -limit.inner() * dec!(1.001);
        assert_eq!(h.engine.ledger().cash(), expected_cash);
    }

    #[test]
    fn test_print_between_limits_fills_nothing() {
        let mut h = Harness::new(no_hedge_config());
        h.warm_up();

        let buy_limit = h.engine.slots().get(Side::Buy).unwrap().limit;
        let sell_limit = h.engine.slots().get(Side::Sell).unwrap().limit;

        // A print strictly inside the quoted spread is not marketable for
        // either side.
        let inside = (buy_limit.inner() + sell_limit.inner()) / dec!(2);
        h.trade(350, inside, dec!(1));

        assert!(h.engine.slots().get(Side::Buy).unwrap().is_submitted());
        assert!(h.engine.slots().get(Side::Sell).unwrap().is_submitted());
        assert_eq!(h.engine.ledger().inventory(), dec!(0));
    }

    #[test]
    fn test_expired_order_canceled_and_replaced() {
        let mut h = Harness::new(no_hedge_config());
        h.warm_up();

        let buy_id = h.engine.slots().get(Side::Buy).unwrap().id;

        // Jump past expiry; the sweep cancels both and requotes.
        h.book(5_000, dec!(99.5), dec!(100.5));

        let buy = h.engine.slots().get(Side::Buy).unwrap();
        assert_ne!(buy.id, buy_id);
        assert!(buy.is_submitted());
        assert_eq!(h.engine.ledger().inventory(), dec!(0));
    }

    #[test]
    fn test_stale_snapshot_ignored() {
        let mut h = Harness::new(no_hedge_config());
        h.warm_up();

        let mid_before = h.engine.quoter().mid().unwrap();

        // Re-deliver an old sequence id with absurd prices
        let stale = DepthSnapshot::top_of_book(
            1,
            400,
            Price::new(dec!(1)),
            Price::new(dec!(2)),
        );
        h.engine.on_event(&FeedEvent::Depth(stale)).unwrap();

        assert_eq!(h.engine.quoter().mid().unwrap(), mid_before);
    }

    #[test]
    fn test_hedge_fill_offsets_inventory() {
        let config = EngineConfig {
            hedge_enabled: true,
            ..Default::default()
        };
        let mut h = Harness::new(config);
        h.warm_up();

        let limit = h.engine.slots().get(Side::Buy).unwrap().limit;
        h.trade(350, limit.inner(), dec!(1));

        let ledger = h.engine.ledger();
        assert_eq!(ledger.inventory(), dec!(1));
        // Hedge sold notional/vwap units
        assert!(ledger.hedge_inventory() < dec!(0));

        // Both commissions hit cash: -notional*(1+c) + notional*(1-c)
        let notional = limit.inner();
        assert_eq!(ledger.cash(), -notional * dec!(2) * dec!(0.001));
    }

    #[test]
    fn test_equity_changes_only_through_fills() {
        let mut h = Harness::new(no_hedge_config());
        h.warm_up();
        // Fix the mark by keeping the mid unchanged afterwards.
        let equity_before = h.engine.equity();

        h.book(400, dec!(99.5), dec!(100.5));
        assert_eq!(h.engine.equity(), equity_before);

        let limit = h.engine.slots().get(Side::Buy).unwrap().limit;
        h.trade(450, limit.inner(), dec!(1));
        assert_ne!(h.engine.equity(), equity_before);
    }

    #[test]
    fn test_fill_on_cross_fills_marketable_order() {
        let config = EngineConfig {
            hedge_enabled: false,
            fill_on_cross: true,
            ..Default::default()
        };
        let mut h = Harness::new(config);
        h.trade(0, dec!(100), dec!(1));
        h.book(100, dec!(99.5), dec!(100.5));

        // A bid at or beyond the best ask is marketable and fills on
        // submission in this variant.
        let pair = QuotePair {
            bid: Price::new(dec!(100.6)),
            ask: Price::new(dec!(101.4)),
        };
        h.engine.requote_side(Side::Buy, &pair).unwrap();

        let buy = h.engine.slots().get(Side::Buy).unwrap();
        assert_eq!(buy.status(), OrderStatus::Filled);
        assert_eq!(h.engine.ledger().inventory(), dec!(1));
    }

    #[test]
    fn test_fill_on_cross_leaves_passive_order() {
        let config = EngineConfig {
            hedge_enabled: false,
            fill_on_cross: true,
            ..Default::default()
        };
        let mut h = Harness::new(config);
        h.trade(0, dec!(100), dec!(1));
        h.book(100, dec!(99.5), dec!(100.5));

        let pair = QuotePair {
            bid: Price::new(dec!(99.0)),
            ask: Price::new(dec!(101.0)),
        };
        h.engine.requote_side(Side::Buy, &pair).unwrap();
        h.engine.requote_side(Side::Sell, &pair).unwrap();

        assert!(h.engine.slots().get(Side::Buy).unwrap().is_submitted());
        assert!(h.engine.slots().get(Side::Sell).unwrap().is_submitted());
        assert_eq!(h.engine.ledger().inventory(), dec!(0));
    }
}

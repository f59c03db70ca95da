//! Inventory-aware bid/ask quote computation.
//!
//! Avellaneda-Stoikov-style closed-form quoting with an optional trend
//! (drift) term. The model tracks the mid price and spread from book
//! updates, keeps a rolling window of mid increments, and produces a
//! bid/ask pair skewed by signed inventory.
//!
//! Prices cross the Decimal/f64 boundary here: the formula runs in `f64`,
//! inputs and outputs stay exact decimals.

use rust_decimal::Decimal;
use tracing::warn;

use mm_core::Price;

use crate::config::QuoterConfig;
use crate::error::{QuoteError, QuoteResult};
use crate::liquidity::LiquidityModel;
use crate::rolling::RollingStats;

/// One computed quote: bid below, ask above the reservation price,
/// snapped to the tick grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotePair {
    pub bid: Price,
    pub ask: Price,
}

/// Avellaneda-Stoikov quoter with a trend term.
pub struct TrendQuoter {
    gamma: f64,
    tick_size: Price,
    dt: f64,
    liquidity: Box<dyn LiquidityModel + Send>,
    mid: Option<Price>,
    spread_ticks: f64,
    increments: RollingStats,
}

impl TrendQuoter {
    /// Build from a validated configuration.
    pub fn new(config: &QuoterConfig) -> QuoteResult<Self> {
        Self::with_liquidity(config, config.liquidity.build())
    }

    /// Build with an explicit liquidity strategy.
    pub fn with_liquidity(
        config: &QuoterConfig,
        liquidity: Box<dyn LiquidityModel + Send>,
    ) -> QuoteResult<Self> {
        config.validate()?;
        Ok(Self {
            gamma: config.gamma,
            tick_size: Price::new(config.tick_size),
            dt: config.dt,
            liquidity,
            mid: None,
            spread_ticks: 0.0,
            increments: RollingStats::new(config.lookback),
        })
    }

    /// Observe a new best bid/ask pair.
    ///
    /// Recomputes the mid and spread-in-ticks; once a previous mid exists,
    /// pushes `(s - s_prev) / dt` into the increment window.
    pub fn update_mid(&mut self, best_bid: Price, best_ask: Price, time_ms: u64) {
        self.spread_ticks =
            ((best_ask.inner() - best_bid.inner()) / self.tick_size.inner()).to_string()
                .parse::<f64>()
                .unwrap_or(0.0);

        let mid = Price::new((best_bid.inner() + best_ask.inner()) / Decimal::TWO);
        if let Some(prev) = self.mid {
            let delta = (mid.to_f64() - prev.to_f64()) / self.dt;
            self.increments.push_at(delta, time_ms);
        }
        self.mid = Some(mid);
    }

    /// Current mid price, if a book update has been seen.
    pub fn mid(&self) -> Option<Price> {
        self.mid
    }

    /// Current spread in ticks.
    pub fn spread_ticks(&self) -> f64 {
        self.spread_ticks
    }

    /// True once the increment window is full.
    pub fn is_ready(&self) -> bool {
        self.increments.is_ready()
    }

    /// The increment window (statistics over mid-price deltas).
    pub fn increment_stats(&self) -> &RollingStats {
        &self.increments
    }

    /// Time-weighted drift estimate of the mid increments.
    ///
    /// Available for callers to feed back as a `mu` override; the default
    /// quote leaves drift at zero.
    pub fn trend(&self) -> Option<f64> {
        self.increments.trend()
    }

    /// Snap a raw price to the nearest tick multiple.
    pub fn round_to_tick(&self, x: f64) -> Price {
        Price::new(Decimal::from_f64_retain(x).unwrap_or_default()).round_to_tick(self.tick_size)
    }

    /// Compute a bid/ask pair for the given signed inventory.
    ///
    /// `mu` defaults to zero (drift disabled); `variance` defaults to the
    /// window's std². Returns `Ok(None)` when no mid is known yet, or when
    /// the window is not ready and no variance override is supplied.
    pub fn quote(
        &self,
        inventory: Decimal,
        mu: Option<f64>,
        variance: Option<f64>,
    ) -> QuoteResult<Option<QuotePair>> {
        let mid = match self.mid {
            Some(mid) => mid,
            None => return Ok(None),
        };
        if !self.increments.is_ready() && variance.is_none() {
            return Ok(None);
        }

        let a = self.liquidity.market_depth(self.spread_ticks);
        let k = self.liquidity.arrival_intensity(self.spread_ticks);
        let mu = mu.unwrap_or(0.0);
        let variance = match variance {
            Some(v) => v,
            None => self.increments.std().map(|s| s * s).unwrap_or(0.0),
        };
        if variance == 0.0 && mu != 0.0 {
            return Err(QuoteError::DegenerateVariance);
        }

        let gamma = self.gamma;
        let q = inventory.to_string().parse::<f64>().unwrap_or(0.0);

        let log_part = (1.0 / gamma) * (1.0 + gamma / k).ln();
        let sqrt_part =
            (variance * gamma / (2.0 * k * a) * (1.0 + gamma / k).powf(1.0 + k / gamma)).sqrt();

        // The drift term divides by variance; it is skipped outright at
        // mu == 0 so a zero variance never produces 0/0.
        let drift = if mu == 0.0 { 0.0 } else { mu / (gamma * variance) };

        let delta_bid = log_part + (-drift + (2.0 * q + 1.0) / 2.0) * sqrt_part;
        let delta_ask = log_part + (drift - (2.0 * q - 1.0) / 2.0) * sqrt_part;

        let half_spread = self.spread_ticks / 2.0 * self.tick_size.to_f64();
        let bid = mid.to_f64() - delta_bid * half_spread;
        let ask = mid.to_f64() + delta_ask * half_spread;

        if !bid.is_finite() || !ask.is_finite() {
            warn!(bid, ask, variance, spread_ticks = self.spread_ticks, "non-finite quote");
            return Err(QuoteError::NonFinite);
        }

        Ok(Some(QuotePair {
            bid: self.round_to_tick(bid),
            ask: self.round_to_tick(ask),
        }))
    }
}

impl std::fmt::Debug for TrendQuoter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrendQuoter")
            .field("gamma", &self.gamma)
            .field("tick_size", &self.tick_size)
            .field("dt", &self.dt)
            .field("mid", &self.mid)
            .field("spread_ticks", &self.spread_ticks)
            .field("window_len", &self.increments.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LiquidityConfig;
    use rust_decimal_macros::dec;

    fn fixed_config(lookback: usize) -> QuoterConfig {
        QuoterConfig {
            gamma: 0.9,
            tick_size: dec!(0.01),
            lookback,
            dt: 1.0,
            liquidity: LiquidityConfig::Fixed {
                depth: 0.9,
                intensity: 0.9,
            },
        }
    }

    fn quoter_with_mid(lookback: usize) -> TrendQuoter {
        let mut quoter = TrendQuoter::new(&fixed_config(lookback)).unwrap();
        // mid = 100, spread = 1.0 → 100 ticks
        quoter.update_mid(Price::new(dec!(99.5)), Price::new(dec!(100.5)), 0);
        quoter
    }

    #[test]
    fn test_no_mid_yields_empty_quote() {
        let quoter = TrendQuoter::new(&fixed_config(3)).unwrap();
        assert_eq!(quoter.quote(Decimal::ZERO, None, None).unwrap(), None);
    }

    #[test]
    fn test_not_ready_without_override_yields_empty_quote() {
        let quoter = quoter_with_mid(3);
        assert!(!quoter.is_ready());
        assert_eq!(quoter.quote(Decimal::ZERO, None, None).unwrap(), None);
    }

    #[test]
    fn test_symmetric_quote_at_zero_inventory() {
        // gamma = A = k = 0.9, variance = 1, mu = 0, q = 0
        // → delta_bid == delta_ask → quotes symmetric around the mid.
        let quoter = quoter_with_mid(3);
        let pair = quoter
            .quote(Decimal::ZERO, Some(0.0), Some(1.0))
            .unwrap()
            .unwrap();

        let mid = quoter.mid().unwrap().inner();
        assert_eq!(mid - pair.bid.inner(), pair.ask.inner() - mid);
        assert!(pair.bid < pair.ask);
    }

    #[test]
    fn test_bid_below_ask_across_inventories() {
        let quoter = quoter_with_mid(3);
        for q in [-10i64, -3, -1, 0, 1, 3, 10] {
            let pair = quoter
                .quote(Decimal::from(q), None, Some(1.0))
                .unwrap()
                .unwrap();
            assert!(pair.bid < pair.ask, "crossed quote at inventory {q}");
        }
    }

    #[test]
    fn test_long_inventory_skews_quotes_down() {
        let quoter = quoter_with_mid(3);
        let flat = quoter.quote(dec!(0), None, Some(1.0)).unwrap().unwrap();
        let long = quoter.quote(dec!(5), None, Some(1.0)).unwrap().unwrap();

        // Long inventory lowers both quotes: eager to sell, reluctant to buy.
        assert!(long.bid < flat.bid);
        assert!(long.ask < flat.ask);
    }

    #[test]
    fn test_increment_window_scenario() {
        // Mids 100, 101, 102, 100 with N=3 → increments [1, 1, -2];
        // ready exactly at the 4th mid.
        let mut quoter = TrendQuoter::new(&fixed_config(3)).unwrap();
        let tick = dec!(0.5);

        for (i, mid) in [dec!(100), dec!(101), dec!(102), dec!(100)].into_iter().enumerate() {
            quoter.update_mid(
                Price::new(mid - tick),
                Price::new(mid + tick),
                i as u64 * 1000,
            );
            let expect_ready = i == 3;
            assert_eq!(quoter.is_ready(), expect_ready, "after mid #{}", i + 1);
        }

        let stats = quoter.increment_stats();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats.mean(), Some(0.0));
        assert_eq!(stats.variance(), Some(2.0));
    }

    #[test]
    fn test_zero_variance_with_drift_is_degenerate() {
        let quoter = quoter_with_mid(3);
        assert_eq!(
            quoter.quote(Decimal::ZERO, Some(0.5), Some(0.0)),
            Err(QuoteError::DegenerateVariance)
        );
    }

    #[test]
    fn test_zero_variance_zero_drift_quotes() {
        // With mu == 0 the drift division is skipped entirely, so zero
        // variance collapses the spread term to log_part alone.
        let quoter = quoter_with_mid(3);
        let pair = quoter
            .quote(Decimal::ZERO, None, Some(0.0))
            .unwrap()
            .unwrap();
        assert!(pair.bid < pair.ask);
    }

    #[test]
    fn test_nonfinite_quote_aborts() {
        struct ZeroDepth;
        impl LiquidityModel for ZeroDepth {
            fn market_depth(&self, _spread_ticks: f64) -> f64 {
                0.0
            }
            fn arrival_intensity(&self, _spread_ticks: f64) -> f64 {
                0.9
            }
        }

        let mut quoter =
            TrendQuoter::with_liquidity(&fixed_config(3), Box::new(ZeroDepth)).unwrap();
        quoter.update_mid(Price::new(dec!(99.5)), Price::new(dec!(100.5)), 0);

        assert_eq!(
            quoter.quote(Decimal::ZERO, None, Some(1.0)),
            Err(QuoteError::NonFinite)
        );
    }

    #[test]
    fn test_quotes_snap_to_tick() {
        let quoter = quoter_with_mid(3);
        let pair = quoter.quote(dec!(2), None, Some(0.37)).unwrap().unwrap();

        let tick = dec!(0.01);
        assert_eq!(pair.bid.inner() % tick, dec!(0));
        assert_eq!(pair.ask.inner() % tick, dec!(0));
    }

    #[test]
    fn test_spread_ticks_tracked() {
        let mut quoter = TrendQuoter::new(&fixed_config(3)).unwrap();
        quoter.update_mid(Price::new(dec!(100.00)), Price::new(dec!(100.05)), 0);
        assert!((quoter.spread_ticks() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_exposed_from_window() {
        let mut quoter = TrendQuoter::new(&fixed_config(4)).unwrap();
        // Mid walks up 1.0 per second → increments constant at 1.0
        for i in 0u64..5 {
            let mid = Decimal::from(100 + i as i64);
            quoter.update_mid(
                Price::new(mid - dec!(0.5)),
                Price::new(mid + dec!(0.5)),
                i * 1000,
            );
        }
        // Constant increments → zero slope
        let slope = quoter.trend().unwrap();
        assert!(slope.abs() < 1e-9);
    }
}

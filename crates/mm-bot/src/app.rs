//! Main application orchestration.
//!
//! Builds the replay feed, the market recorder, and the engine, then runs
//! the event loop: one queue, one consumer, events in event-time order.

use tokio::sync::mpsc;
use tracing::{info, warn};

use mm_engine::MarketMakerEngine;
use mm_feed::FeedEvent;
use mm_persistence::{EngineLogs, MarketRecorder};
use mm_quote::TrendQuoter;
use mm_replay::ReplaySource;

use crate::config::AppConfig;
use crate::error::AppResult;

/// Feed queue depth. The replay task blocks when the engine falls behind;
/// a live connector would see the same bound.
const FEED_QUEUE_DEPTH: usize = 1024;

/// Main application.
pub struct Application {
    config: AppConfig,
}

impl Application {
    /// Create a new application with validated configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.quoter.validate()?;
        config.engine.validate()?;
        Ok(Self { config })
    }

    /// Replay the recorded feed through the engine to completion.
    pub async fn run(&mut self) -> AppResult<()> {
        let out_dir = self.config.resolve_out_dir();
        std::fs::create_dir_all(&out_dir)?;

        info!(
            instrument = %self.config.instrument,
            data_dir = %self.config.data_dir,
            out_dir = %out_dir.display(),
            "starting replay run"
        );

        let source = ReplaySource::from_dir(&self.config.data_dir)?;
        if source.is_empty() {
            warn!("no events to replay");
        }

        let quoter = TrendQuoter::new(&self.config.quoter)?;
        let logs = EngineLogs::open(&out_dir)?;
        let mut engine = MarketMakerEngine::new(self.config.engine.clone(), quoter, logs)?;
        let mut recorder = MarketRecorder::open(&out_dir)?;

        let (tx, mut rx) = mpsc::channel::<FeedEvent>(FEED_QUEUE_DEPTH);
        let feed = tokio::spawn(async move {
            for event in source.into_events() {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });

        while let Some(event) = rx.recv().await {
            recorder.on_event(&event)?;
            engine.on_event(&event)?;
        }
        let _ = feed.await;

        let ledger = engine.ledger();
        info!(
            cash = %ledger.cash(),
            inventory = %ledger.inventory(),
            hedge_inventory = %ledger.hedge_inventory(),
            equity = %engine.equity(),
            "replay complete"
        );

        Ok(())
    }
}

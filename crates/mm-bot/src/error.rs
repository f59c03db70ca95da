//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Quote error: {0}")]
    Quote(#[from] mm_quote::QuoteError),

    #[error("Engine error: {0}")]
    Engine(#[from] mm_engine::EngineError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] mm_persistence::PersistenceError),

    #[error("Replay error: {0}")]
    Replay(#[from] mm_replay::ReplayError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

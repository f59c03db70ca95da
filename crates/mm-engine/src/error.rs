//! Engine error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("quote error: {0}")]
    Quote(#[from] mm_quote::QuoteError),

    #[error("persistence error: {0}")]
    Persistence(#[from] mm_persistence::PersistenceError),

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

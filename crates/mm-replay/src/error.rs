//! Replay error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("persistence error: {0}")]
    Persistence(#[from] mm_persistence::PersistenceError),
}

pub type ReplayResult<T> = Result<T, ReplayError>;

//! Quote model error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("invalid quoter configuration: {0}")]
    InvalidConfig(String),

    /// Zero variance with a nonzero drift term: the drift division is
    /// undefined and must not be evaluated.
    #[error("degenerate variance: zero variance with nonzero drift")]
    DegenerateVariance,

    /// A non-finite bid or ask reached the end of the computation. The
    /// quoting cycle aborts rather than submit a malformed order.
    #[error("quote computation produced a non-finite price")]
    NonFinite,
}

pub type QuoteResult<T> = Result<T, QuoteError>;

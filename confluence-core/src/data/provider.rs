//! Quote provider trait and structured error types.
//!
//! Providers abstract over where bars come from (CSV fixtures, a synthetic
//! generator, a live feed adapter elsewhere) so the engine can be fed and
//! mocked uniformly. Fetching is the collaborator's problem: the engine
//! itself never blocks on I/O.

use thiserror::Error;

use crate::domain::PriceBar;

/// Structured error types for provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error("no bars returned for symbol '{symbol}'")]
    Empty { symbol: String },

    #[error("malformed bar data: {0}")]
    Malformed(String),
}

/// Supplies ordered price bars for a symbol.
///
/// Implementations must return bars in ascending timestamp order; the engine
/// re-validates the series invariants on every evaluation regardless.
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider, used in decisions and logs.
    fn name(&self) -> &str;

    /// Fetch at least `lookback` trailing bars for `symbol`.
    fn price_bars(&self, symbol: &str, lookback: usize) -> Result<Vec<PriceBar>, ProviderError>;
}

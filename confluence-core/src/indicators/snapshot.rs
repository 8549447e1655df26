//! Snapshot builder — the full `IndicatorSet` for one source window.
//!
//! Runs every indicator against the same trailing window and rejects any
//! non-finite output before it can reach the signal analyzer.

use chrono::{DateTime, Utc};

use crate::config::EngineConfig;
use crate::domain::{IndicatorSet, PriceBar, SourceQuote};
use crate::error::EngineError;

use super::{bollinger, ema, macd, rsi, sma, stochastic, volatility, volume_profile};

/// Compute the complete indicator snapshot from a trailing bar window.
///
/// Each indicator enforces its own lookback; the shortest window that can
/// succeed is `config.required_lookback()` bars.
pub fn compute_snapshot(
    bars: &[PriceBar],
    config: &EngineConfig,
) -> Result<IndicatorSet, EngineError> {
    let set = IndicatorSet {
        rsi: rsi(bars, config.rsi_period)?,
        macd: macd(
            bars,
            config.ema_short,
            config.ema_long,
            config.macd_signal_period,
        )?,
        sma20: sma(bars, config.sma_short)?,
        sma50: sma(bars, config.sma_long)?,
        ema12: ema(bars, config.ema_short)?,
        ema26: ema(bars, config.ema_long)?,
        bollinger: bollinger(bars, config.bollinger_period, config.bollinger_std_dev)?,
        stochastic: stochastic(bars, config.stochastic_period)?,
        volume: volume_profile(bars, config.volume_avg_period)?,
        volatility: volatility(bars, config.volatility_period)?,
        current_price: bars[bars.len() - 1].close,
    };

    if !set.is_finite() {
        return Err(EngineError::Computation {
            context: "indicator snapshot",
        });
    }

    Ok(set)
}

/// Build a named `SourceQuote` from a validated bar window.
///
/// The quote timestamp is the last bar's timestamp, not the wall clock.
pub fn source_quote(
    source: impl Into<String>,
    bars: &[PriceBar],
    config: &EngineConfig,
) -> Result<SourceQuote, EngineError> {
    let indicators = compute_snapshot(bars, config)?;
    let last: DateTime<Utc> = bars[bars.len() - 1].timestamp;
    Ok(SourceQuote {
        source: source.into(),
        price: indicators.current_price,
        indicators,
        timestamp: last,
    })
}

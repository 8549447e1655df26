//! Stochastic oscillator — position of the latest close in the trailing
//! high/low range, in [0, 100].
//!
//! Lookback: period. Edge case: max high == min low → 0 (guarded division).

use crate::domain::PriceBar;
use crate::error::EngineError;

use super::trailing_window;

pub fn stochastic(bars: &[PriceBar], period: usize) -> Result<f64, EngineError> {
    let window = trailing_window(bars, period, "stochastic")?;

    let min_low = window.iter().map(|bar| bar.low).fold(f64::INFINITY, f64::min);
    let max_high = window
        .iter()
        .map(|bar| bar.high)
        .fold(f64::NEG_INFINITY, f64::max);
    let last_close = window[window.len() - 1].close;

    if max_high == min_low {
        return Ok(0.0);
    }

    Ok((last_close - min_low) / (max_high - min_low) * 100.0)
}

//! Exponential Moving Average (EMA).
//!
//! Seeded with the first value in the window, then the recurrence
//! `ema = value · α + ema · (1 − α)` with α = 2/(period + 1) over the rest.
//! Lookback: period.

use crate::domain::PriceBar;
use crate::error::EngineError;

use super::trailing_window;

/// EMA of the window's closes. The whole window participates; `period` only
/// sets the smoothing factor and the minimum window length.
pub fn ema(bars: &[PriceBar], period: usize) -> Result<f64, EngineError> {
    trailing_window(bars, period, "ema")?;
    let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
    ema_of_series(&closes, period)
}

/// EMA over a pre-extracted f64 series. Used by the MACD signal line, which
/// smooths a derived series rather than raw closes.
pub fn ema_of_series(values: &[f64], period: usize) -> Result<f64, EngineError> {
    if values.len() < period {
        return Err(EngineError::InsufficientData {
            indicator: "ema",
            required: period,
            actual: values.len(),
        });
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut current = values[0];
    for &value in &values[1..] {
        current = value * alpha + current * (1.0 - alpha);
    }
    Ok(current)
}

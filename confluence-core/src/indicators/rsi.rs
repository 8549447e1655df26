//! Relative Strength Index (RSI).
//!
//! Simple-average form: average gain / average loss over the trailing
//! `period` deltas, RSI = 100 − 100 / (1 + avg_gain / avg_loss).
//! Lookback: period + 1 closes.
//! Edge case: avg_loss == 0 → RSI = 100 (no division by zero).

use crate::domain::PriceBar;
use crate::error::EngineError;

use super::trailing_window;

/// RSI of the trailing window, in [0, 100].
pub fn rsi(bars: &[PriceBar], period: usize) -> Result<f64, EngineError> {
    let window = trailing_window(bars, period + 1, "rsi")?;

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in window.windows(2) {
        let change = pair[1].close - pair[0].close;
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum -= change;
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        return Ok(100.0);
    }

    Ok(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
}

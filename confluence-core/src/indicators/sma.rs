//! Simple Moving Average (SMA).
//!
//! Arithmetic mean of the trailing `period` closes. Lookback: period.

use crate::domain::PriceBar;
use crate::error::EngineError;

use super::trailing_window;

pub fn sma(bars: &[PriceBar], period: usize) -> Result<f64, EngineError> {
    let window = trailing_window(bars, period, "sma")?;
    let sum: f64 = window.iter().map(|bar| bar.close).sum();
    Ok(sum / period as f64)
}

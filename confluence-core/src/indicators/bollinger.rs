//! Bollinger Bands — SMA middle band ± k population standard deviations.
//!
//! Lookback: period.

use crate::domain::{BollingerBands, PriceBar};
use crate::error::EngineError;

use super::trailing_window;

pub fn bollinger(
    bars: &[PriceBar],
    period: usize,
    std_multiplier: f64,
) -> Result<BollingerBands, EngineError> {
    let window = trailing_window(bars, period, "bollinger")?;

    let mean = window.iter().map(|bar| bar.close).sum::<f64>() / period as f64;
    let variance = window
        .iter()
        .map(|bar| {
            let diff = bar.close - mean;
            diff * diff
        })
        .sum::<f64>()
        / period as f64;
    let band = std_multiplier * variance.sqrt();

    Ok(BollingerBands {
        upper: mean + band,
        middle: mean,
        lower: mean - band,
    })
}

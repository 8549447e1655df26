//! Moving Average Convergence Divergence (MACD).
//!
//! macd[t] = EMA(short)[t] − EMA(long)[t], both seeded at the window's first
//! close; value = last macd; signal = EMA(signal_period) of the macd series;
//! histogram = value − signal.
//! Lookback: long + signal_period.

use crate::domain::{MacdSet, PriceBar};
use crate::error::EngineError;

use super::ema::ema_of_series;
use super::trailing_window;

pub fn macd(
    bars: &[PriceBar],
    short: usize,
    long: usize,
    signal_period: usize,
) -> Result<MacdSet, EngineError> {
    trailing_window(bars, long + signal_period, "macd")?;

    let alpha_short = 2.0 / (short as f64 + 1.0);
    let alpha_long = 2.0 / (long as f64 + 1.0);

    // Run both EMAs bar-by-bar, collecting their gap at each step. Both are
    // seeded at the first close, so the series starts at zero.
    let mut ema_short = bars[0].close;
    let mut ema_long = bars[0].close;
    let mut macd_series = Vec::with_capacity(bars.len());
    macd_series.push(0.0);
    for bar in &bars[1..] {
        ema_short = bar.close * alpha_short + ema_short * (1.0 - alpha_short);
        ema_long = bar.close * alpha_long + ema_long * (1.0 - alpha_long);
        macd_series.push(ema_short - ema_long);
    }

    let value = *macd_series.last().expect("non-empty macd series");
    let signal_line = ema_of_series(&macd_series, signal_period)?;

    Ok(MacdSet {
        value,
        signal_line,
        histogram: value - signal_line,
    })
}

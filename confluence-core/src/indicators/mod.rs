//! Indicator library — pure window-to-scalar functions.
//!
//! Each function consumes the trailing portion of an ordered bar window and
//! produces the indicator's latest value. Unlike a backtesting engine that
//! precomputes full series, the snapshot here is recomputed fresh on every
//! evaluation; nothing is cached between calls.
//!
//! Every function fails with `EngineError::InsufficientData` when the window
//! is shorter than its lookback, and guards its divisions so that a NaN can
//! only mean a logic defect upstream.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod snapshot;
pub mod stochastic;
pub mod volatility;
pub mod volume;

pub use bollinger::bollinger;
pub use ema::{ema, ema_of_series};
pub use macd::macd;
pub use rsi::rsi;
pub use sma::sma;
pub use snapshot::{compute_snapshot, source_quote};
pub use stochastic::stochastic;
pub use volatility::volatility;
pub use volume::volume_profile;

use crate::domain::PriceBar;
use crate::error::EngineError;

/// Shared lookback guard: the trailing `required` bars of `bars`, or an
/// `InsufficientData` error naming the indicator.
pub(crate) fn trailing_window<'a>(
    bars: &'a [PriceBar],
    required: usize,
    indicator: &'static str,
) -> Result<&'a [PriceBar], EngineError> {
    if bars.len() < required {
        return Err(EngineError::InsufficientData {
            indicator,
            required,
            actual: bars.len(),
        });
    }
    Ok(&bars[bars.len() - required..])
}

/// Create synthetic bars from close prices for testing.
///
/// Hourly timestamps, open = previous close, high/low bracketing, volume 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<PriceBar> {
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                timestamp: base + chrono::Duration::hours(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: (open.min(close) - 1.0).max(0.01),
                close,
                volume: 1_000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

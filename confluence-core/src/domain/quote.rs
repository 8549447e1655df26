//! Indicator snapshot and per-source quote types.
//!
//! An `IndicatorSet` is recomputed fresh on every evaluation from a trailing
//! bar window — it is never persisted independently. The fields form a closed
//! set; there is no dynamic key iteration anywhere in the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// MACD triple: EMA(short) − EMA(long), its smoothed signal line, and the gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdSet {
    pub value: f64,
    pub signal_line: f64,
    pub histogram: f64,
}

/// Bollinger channel: SMA middle band ± k population standard deviations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Qualitative volume direction relative to its trailing average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeTrend {
    Increasing,
    Stable,
    Decreasing,
}

/// Current volume against its trailing average, with the derived trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfile {
    pub current: f64,
    pub average: f64,
    pub trend: VolumeTrend,
}

/// Full technical snapshot for one source at one evaluation instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub rsi: f64,
    pub macd: MacdSet,
    pub sma20: f64,
    pub sma50: f64,
    pub ema12: f64,
    pub ema26: f64,
    pub bollinger: BollingerBands,
    pub stochastic: f64,
    pub volume: VolumeProfile,
    pub volatility: f64,
    pub current_price: f64,
}

impl IndicatorSet {
    /// True if every numeric field is finite.
    ///
    /// The snapshot builder rejects a non-finite set with
    /// `EngineError::Computation` before it can reach the signal analyzer.
    pub fn is_finite(&self) -> bool {
        [
            self.rsi,
            self.macd.value,
            self.macd.signal_line,
            self.macd.histogram,
            self.sma20,
            self.sma50,
            self.ema12,
            self.ema26,
            self.bollinger.upper,
            self.bollinger.middle,
            self.bollinger.lower,
            self.stochastic,
            self.volume.current,
            self.volume.average,
            self.volatility,
            self.current_price,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// One source's view of a symbol: last price plus its indicator snapshot.
///
/// Primary and secondary sources share this type; the secondary is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceQuote {
    pub source: String,
    pub price: f64,
    pub indicators: IndicatorSet,
    pub timestamp: DateTime<Utc>,
}

//! Signal factors — atomic technical observations.
//!
//! The factor set is a closed, tagged enumeration with one fixed evaluation
//! rule per kind. Unknown or dynamically-named factors cannot exist.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Directional reading of a factor or composite signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Bullish,
    Neutral,
    Bearish,
}

impl Direction {
    /// Numeric direction: +1, 0, −1.
    pub fn value(&self) -> f64 {
        match self {
            Direction::Bullish => 1.0,
            Direction::Neutral => 0.0,
            Direction::Bearish => -1.0,
        }
    }
}

/// Which technical rule produced a factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    /// RSI oversold/overbought extremes.
    Rsi,
    /// MACD histogram sign with line confirmation.
    Macd,
    /// Price vs short vs long moving average alignment.
    MaTrend,
    /// Price outside the Bollinger channel.
    Bollinger,
}

impl FactorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorKind::Rsi => "rsi",
            FactorKind::Macd => "macd",
            FactorKind::MaTrend => "ma_trend",
            FactorKind::Bollinger => "bollinger",
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One triggered rule: kind, direction, and weight in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalFactor {
    pub kind: FactorKind,
    pub direction: Direction,
    pub magnitude: f64,
}

impl SignalFactor {
    pub fn new(kind: FactorKind, direction: Direction, magnitude: f64) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&magnitude),
            "factor magnitude must be in [0, 1]"
        );
        Self {
            kind,
            direction,
            magnitude,
        }
    }

    /// Weighted contribution to the composite direction.
    pub fn contribution(&self) -> f64 {
        self.direction.value() * self.magnitude
    }

    /// Short human-readable label, e.g. "RSI oversold".
    pub fn label(&self) -> &'static str {
        match (self.kind, self.direction) {
            (FactorKind::Rsi, Direction::Bullish) => "RSI oversold",
            (FactorKind::Rsi, _) => "RSI overbought",
            (FactorKind::Macd, Direction::Bullish) => "MACD bullish",
            (FactorKind::Macd, _) => "MACD bearish",
            (FactorKind::MaTrend, Direction::Bullish) => "price above moving averages",
            (FactorKind::MaTrend, _) => "price below moving averages",
            (FactorKind::Bollinger, Direction::Bullish) => "price below lower Bollinger band",
            (FactorKind::Bollinger, _) => "price above upper Bollinger band",
        }
    }
}

//! Rule-based signal analyzer — the default `ScoringStrategy`.
//!
//! Fixed factor rules over one indicator snapshot:
//! - RSI < 30 → bullish 1.0; RSI > 70 → bearish 1.0
//! - histogram > 0 and macd > signal → bullish 1.0; both negative → bearish 1.0
//! - price > SMA20 > SMA50 → bullish 0.5; price < SMA20 < SMA50 → bearish 0.5
//! - price below lower band → bullish 0.3; above upper band → bearish 0.3
//!
//! Composite = magnitude-weighted mean of active factor directions. Above
//! +0.3 → BUY, below −0.3 → SELL, otherwise HOLD. The thresholds are
//! exclusive: a composite of exactly ±0.3 holds.

use crate::domain::{Action, IndicatorSet};

use super::factor::{Direction, FactorKind, SignalFactor};
use super::scoring::{DirectionalSignal, ScoringStrategy};

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;

/// Deterministic rule-based scorer.
#[derive(Debug, Clone)]
pub struct RuleBasedScoring {
    /// Composite threshold beyond which the signal turns directional.
    pub action_threshold: f64,
}

impl Default for RuleBasedScoring {
    fn default() -> Self {
        Self {
            action_threshold: 0.3,
        }
    }
}

impl RuleBasedScoring {
    fn collect_factors(&self, ind: &IndicatorSet) -> Vec<SignalFactor> {
        let mut factors = Vec::with_capacity(4);

        if ind.rsi < RSI_OVERSOLD {
            factors.push(SignalFactor::new(FactorKind::Rsi, Direction::Bullish, 1.0));
        } else if ind.rsi > RSI_OVERBOUGHT {
            factors.push(SignalFactor::new(FactorKind::Rsi, Direction::Bearish, 1.0));
        }

        if ind.macd.histogram > 0.0 && ind.macd.value > ind.macd.signal_line {
            factors.push(SignalFactor::new(FactorKind::Macd, Direction::Bullish, 1.0));
        } else if ind.macd.histogram < 0.0 && ind.macd.value < ind.macd.signal_line {
            factors.push(SignalFactor::new(FactorKind::Macd, Direction::Bearish, 1.0));
        }

        let price = ind.current_price;
        if price > ind.sma20 && ind.sma20 > ind.sma50 {
            factors.push(SignalFactor::new(
                FactorKind::MaTrend,
                Direction::Bullish,
                0.5,
            ));
        } else if price < ind.sma20 && ind.sma20 < ind.sma50 {
            factors.push(SignalFactor::new(
                FactorKind::MaTrend,
                Direction::Bearish,
                0.5,
            ));
        }

        if price < ind.bollinger.lower {
            factors.push(SignalFactor::new(
                FactorKind::Bollinger,
                Direction::Bullish,
                0.3,
            ));
        } else if price > ind.bollinger.upper {
            factors.push(SignalFactor::new(
                FactorKind::Bollinger,
                Direction::Bearish,
                0.3,
            ));
        }

        factors
    }
}

impl ScoringStrategy for RuleBasedScoring {
    fn name(&self) -> &str {
        "rule_based"
    }

    fn score(&self, indicators: &IndicatorSet) -> DirectionalSignal {
        let factors = self.collect_factors(indicators);
        if factors.is_empty() {
            return DirectionalSignal::neutral();
        }

        let composite = factors.iter().map(SignalFactor::contribution).sum::<f64>()
            / factors.len() as f64;

        let action = if composite > self.action_threshold {
            Action::Buy
        } else if composite < -self.action_threshold {
            Action::Sell
        } else {
            Action::Hold
        };

        let direction = if composite > self.action_threshold {
            Direction::Bullish
        } else if composite < -self.action_threshold {
            Direction::Bearish
        } else {
            Direction::Neutral
        };

        DirectionalSignal {
            action,
            strength: composite.abs().min(1.0),
            direction,
            factors,
        }
    }
}

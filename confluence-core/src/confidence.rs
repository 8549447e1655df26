//! Confidence calculator — folds signal strength, source agreement, price
//! discrepancy, and extremity bonuses into a bounded confidence percentage.
//!
//! Ordering matters and is fixed: base from discrepancy, multiplicative
//! strength and agreement terms, additive extremity bonuses, discrepancy
//! penalty, degraded-mode cap, final clamp into [min, max], then rounding
//! to an integer percent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::{Action, IndicatorSet};
use crate::reconcile::ReconciliationResult;
use crate::signal::DirectionalSignal;

/// RSI beyond these bounds counts as an extreme reading.
const RSI_EXTREME_LOW: f64 = 20.0;
const RSI_EXTREME_HIGH: f64 = 80.0;
const RSI_EXTREME_BONUS: f64 = 0.05;
/// Histogram magnitude above this earns a momentum bonus.
const MACD_STRENGTH_THRESHOLD: f64 = 0.5;
const MACD_STRENGTH_BONUS: f64 = 0.025;
/// Volume above this multiple of its average earns a confirmation bonus.
const VOLUME_SURGE_RATIO: f64 = 1.5;
const VOLUME_SURGE_BONUS: f64 = 0.05;

/// Final action and confidence after reconciliation-aware folding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceOutcome {
    pub action: Action,
    /// Clamped confidence fraction, in [min_confidence, max_confidence].
    pub confidence: f64,
    /// `round(confidence × 100)`, always within [10, 95] under defaults.
    pub confidence_pct: u8,
    /// True when source disagreement overrode a directional signal.
    pub forced_hold: bool,
}

pub fn calculate(
    signal: &DirectionalSignal,
    recon: &ReconciliationResult,
    indicators: &IndicatorSet,
    config: &EngineConfig,
) -> ConfidenceOutcome {
    let discrepancy = recon.price_discrepancy;

    let base = (1.0 - discrepancy * 5.0).max(0.3).clamp(0.0, 1.0);
    let mut confidence = base * (1.0 + signal.strength) * (0.5 + recon.agreement_score);

    confidence += extremity_bonus(indicators);

    if discrepancy > config.discrepancy_penalty_threshold {
        confidence *= 1.0 - discrepancy;
    }

    let mut action = signal.action;
    let mut forced_hold = false;
    if recon.agreement_score < config.agreement_threshold && action.is_directional() {
        debug!(
            agreement = recon.agreement_score,
            threshold = config.agreement_threshold,
            "source agreement below threshold, forcing HOLD"
        );
        action = Action::Hold;
        forced_hold = true;
    }

    if recon.degraded {
        confidence = confidence.min(config.degraded_confidence_cap);
    }

    let confidence = confidence.clamp(config.min_confidence, config.max_confidence);
    let confidence_pct = (confidence * 100.0).round() as u8;

    ConfidenceOutcome {
        action,
        confidence,
        confidence_pct,
        forced_hold,
    }
}

fn extremity_bonus(indicators: &IndicatorSet) -> f64 {
    let mut bonus = 0.0;
    if indicators.rsi < RSI_EXTREME_LOW || indicators.rsi > RSI_EXTREME_HIGH {
        bonus += RSI_EXTREME_BONUS;
    }
    if indicators.macd.histogram.abs() > MACD_STRENGTH_THRESHOLD {
        bonus += MACD_STRENGTH_BONUS;
    }
    if indicators.volume.current > indicators.volume.average * VOLUME_SURGE_RATIO {
        bonus += VOLUME_SURGE_BONUS;
    }
    bonus
}

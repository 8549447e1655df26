//! Dual-source reconciliation — agreement scoring and price discrepancy.
//!
//! Two quote sources for the same symbol rarely match exactly. The reconciler
//! compares the qualitative direction of a fixed set of factor pairs and
//! reports the fraction that agree, plus the relative price gap. Factors that
//! cannot be compared (a non-finite reading on either side) are excluded from
//! both the numerator and the denominator — absence is never disagreement.

use serde::{Deserialize, Serialize};

use crate::domain::{IndicatorSet, SourceQuote};
use crate::signal::FactorKind;

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;
/// Two neutral RSI readings agree when they differ by less than this.
const RSI_NEUTRAL_BAND: f64 = 10.0;

/// Agreement verdict for one comparable factor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorAgreement {
    pub kind: FactorKind,
    pub agree: bool,
}

/// Outcome of comparing two sources (or the degenerate single-source form).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Fraction of compared factors that agree, in [0, 1].
    pub agreement_score: f64,
    /// |primary − secondary| / primary, in [0, ∞).
    pub price_discrepancy: f64,
    pub per_factor: Vec<FactorAgreement>,
    /// True when only one source contributed.
    pub degraded: bool,
}

impl ReconciliationResult {
    /// Single-source mode: full nominal agreement, zero discrepancy, flagged
    /// degraded so the confidence calculator can cap the result.
    pub fn single_source() -> Self {
        Self {
            agreement_score: 1.0,
            price_discrepancy: 0.0,
            per_factor: Vec::new(),
            degraded: true,
        }
    }
}

/// Compare two sources' snapshots for the same symbol.
pub fn reconcile(primary: &SourceQuote, secondary: &SourceQuote) -> ReconciliationResult {
    let comparisons = [
        (
            FactorKind::Rsi,
            compare_rsi(&primary.indicators, &secondary.indicators),
        ),
        (
            FactorKind::Macd,
            compare_macd(&primary.indicators, &secondary.indicators),
        ),
        (
            FactorKind::MaTrend,
            compare_price_vs_sma(&primary.indicators, &secondary.indicators),
        ),
    ];

    let per_factor: Vec<FactorAgreement> = comparisons
        .into_iter()
        .filter_map(|(kind, verdict)| verdict.map(|agree| FactorAgreement { kind, agree }))
        .collect();

    let agreement_score = if per_factor.is_empty() {
        // Nothing comparable: treat as nominal agreement rather than distrust.
        1.0
    } else {
        per_factor.iter().filter(|f| f.agree).count() as f64 / per_factor.len() as f64
    };

    let price_discrepancy = (primary.price - secondary.price).abs() / primary.price;

    ReconciliationResult {
        agreement_score,
        price_discrepancy,
        per_factor,
        degraded: false,
    }
}

#[derive(PartialEq)]
enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

fn rsi_zone(rsi: f64) -> RsiZone {
    if rsi < RSI_OVERSOLD {
        RsiZone::Oversold
    } else if rsi > RSI_OVERBOUGHT {
        RsiZone::Overbought
    } else {
        RsiZone::Neutral
    }
}

/// Same extreme zone agrees outright; both neutral agree when the readings
/// are close; a zone mismatch disagrees.
fn compare_rsi(a: &IndicatorSet, b: &IndicatorSet) -> Option<bool> {
    if !a.rsi.is_finite() || !b.rsi.is_finite() {
        return None;
    }
    let (zone_a, zone_b) = (rsi_zone(a.rsi), rsi_zone(b.rsi));
    if zone_a != zone_b {
        return Some(false);
    }
    if zone_a == RsiZone::Neutral {
        return Some((a.rsi - b.rsi).abs() < RSI_NEUTRAL_BAND);
    }
    Some(true)
}

fn compare_macd(a: &IndicatorSet, b: &IndicatorSet) -> Option<bool> {
    if !a.macd.histogram.is_finite() || !b.macd.histogram.is_finite() {
        return None;
    }
    Some(a.macd.histogram.signum() == b.macd.histogram.signum())
}

fn compare_price_vs_sma(a: &IndicatorSet, b: &IndicatorSet) -> Option<bool> {
    let gap_a = a.current_price - a.sma20;
    let gap_b = b.current_price - b.sma20;
    if !gap_a.is_finite() || !gap_b.is_finite() {
        return None;
    }
    Some(gap_a.signum() == gap_b.signum())
}

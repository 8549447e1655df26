//! Position sizing — confidence- and risk-scaled percent of capital.
//!
//! Sizing converts the configured base budget into a percentage, scaled by
//! the decision's confidence and the market's risk level, then clamped into
//! the profile's bounds. Sizing never decides direction.

use super::profile::{RiskLevel, RiskParams};

/// Recommended position size in percent of capital.
pub fn position_size_pct(
    base_position_pct: f64,
    confidence: f64,
    level: RiskLevel,
    params: &RiskParams,
) -> f64 {
    let raw = base_position_pct * confidence * level.position_multiplier() * 100.0;
    raw.clamp(params.min_position_pct, params.max_position_pct)
}

//! Hold-time estimation.
//!
//! A stronger composite signal earns a longer recommended hold before
//! re-evaluation; an intact moving-average trend stretches it further. The
//! resulting hours map onto scalp/day/swing buckets.

use crate::domain::HoldTime;
use crate::signal::{DirectionalSignal, FactorKind};

/// Base hours at zero strength.
const BASE_HOURS: f64 = 1.0;
/// Additional hours at full strength.
const STRENGTH_HOURS: f64 = 12.0;
/// Stretch factor when the MA-trend factor is active.
const TREND_STRETCH: f64 = 1.5;
/// Upper bound on any recommendation.
const MAX_HOURS: f64 = 72.0;

pub fn estimate_hold_time(signal: &DirectionalSignal) -> HoldTime {
    let mut hours = BASE_HOURS + STRENGTH_HOURS * signal.strength;
    if signal.has_factor(FactorKind::MaTrend) {
        hours *= TREND_STRETCH;
    }
    HoldTime::from_hours(hours.min(MAX_HOURS))
}

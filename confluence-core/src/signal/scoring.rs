//! Scoring strategy seam.
//!
//! The rule-based analyzer is the default implementation; alternative scorers
//! (e.g. a learned model) plug in behind the same trait without touching the
//! rest of the pipeline.

use serde::{Deserialize, Serialize};

use crate::domain::{Action, IndicatorSet};

use super::factor::{Direction, SignalFactor};

/// Directional signal for one source: action, strength, and the factors
/// that produced it, in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalSignal {
    pub action: Action,
    /// Absolute composite direction, in [0, 1].
    pub strength: f64,
    pub direction: Direction,
    pub factors: Vec<SignalFactor>,
}

impl DirectionalSignal {
    /// A no-signal HOLD with no contributing factors.
    pub fn neutral() -> Self {
        Self {
            action: Action::Hold,
            strength: 0.0,
            direction: Direction::Neutral,
            factors: Vec::new(),
        }
    }

    /// True if a factor of the given kind contributed.
    pub fn has_factor(&self, kind: super::factor::FactorKind) -> bool {
        self.factors.iter().any(|factor| factor.kind == kind)
    }
}

/// Converts one source's indicator snapshot into a directional signal.
pub trait ScoringStrategy: Send + Sync {
    /// Strategy name for logs and decision metadata.
    fn name(&self) -> &str;

    fn score(&self, indicators: &IndicatorSet) -> DirectionalSignal;
}

//! Trade decision, outcome, and history record types.
//!
//! A `TradeDecision` is created once by the composer, never mutated, and
//! appended to the bounded decision history. Outcomes attach later, if at
//! all — outcome arrival is best-effort.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::DecisionId;

/// Advisory action for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    /// True for Buy/Sell; false for Hold.
    pub fn is_directional(&self) -> bool {
        !matches!(self, Action::Hold)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggested entry price band. Invariant: `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryZone {
    pub low: f64,
    pub high: f64,
}

/// Qualitative hold-duration bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldBucket {
    /// Under two hours.
    Scalp,
    /// Two to eight hours.
    Day,
    /// More than eight hours.
    Swing,
}

/// Recommended duration to hold before re-evaluating, with its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldTime {
    pub hours: f64,
    pub bucket: HoldBucket,
}

impl HoldTime {
    pub fn from_hours(hours: f64) -> Self {
        let bucket = if hours < 2.0 {
            HoldBucket::Scalp
        } else if hours <= 8.0 {
            HoldBucket::Day
        } else {
            HoldBucket::Swing
        };
        Self { hours, bucket }
    }
}

/// The composed, immutable output of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDecision {
    pub id: DecisionId,
    pub symbol: String,
    pub action: Action,
    /// Always clamped into [10, 95].
    pub confidence_pct: u8,
    pub entry_zone: EntryZone,
    pub target: f64,
    pub stop_loss: f64,
    /// 0 for HOLD, otherwise `|target − entry| / |entry − stop_loss|`.
    pub risk_reward_ratio: f64,
    pub position_size_pct: f64,
    pub hold_time: HoldTime,
    /// True when only the primary source contributed (secondary missing or
    /// failed). Carries a confidence ceiling, not an error.
    pub degraded: bool,
    pub reasoning: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Realized result attached to a prior decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub profit: f64,
    pub success: bool,
    pub actual_hold_hours: f64,
}

/// One history entry: a decision plus its outcome once known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decision: TradeDecision,
    pub outcome: Option<Outcome>,
}

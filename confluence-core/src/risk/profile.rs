//! Risk profiles and risk-level classification.
//!
//! Three named profiles parameterize the zone multipliers and position
//! bounds. Balanced carries the canonical multipliers (2.0× target, 1.5×
//! stop); conservative tightens both and the position ceiling, aggressive
//! widens them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named risk posture selected in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

/// Concrete parameters a profile supplies to the zone and sizing math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskParams {
    /// Target distance in effective-volatility multiples.
    pub target_multiplier: f64,
    /// Stop distance in effective-volatility multiples.
    pub stop_multiplier: f64,
    /// Position size bounds, in percent of capital.
    pub min_position_pct: f64,
    pub max_position_pct: f64,
}

impl RiskProfile {
    pub fn params(&self) -> RiskParams {
        match self {
            Self::Conservative => RiskParams {
                target_multiplier: 1.5,
                stop_multiplier: 1.0,
                min_position_pct: 1.0,
                max_position_pct: 15.0,
            },
            Self::Balanced => RiskParams {
                target_multiplier: 2.0,
                stop_multiplier: 1.5,
                min_position_pct: 2.0,
                max_position_pct: 25.0,
            },
            Self::Aggressive => RiskParams {
                target_multiplier: 2.5,
                stop_multiplier: 2.0,
                min_position_pct: 2.0,
                max_position_pct: 35.0,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "balanced" => Ok(Self::Balanced),
            "aggressive" => Ok(Self::Aggressive),
            other => Err(format!(
                "unknown risk profile '{other}' (expected conservative, balanced, or aggressive)"
            )),
        }
    }
}

/// Market-condition classification driving the position-size multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Volatility above this marks high risk; agreement below 0.7 does too.
const HIGH_VOLATILITY: f64 = 0.05;
const LOW_VOLATILITY: f64 = 0.025;
const LOW_RISK_AGREEMENT: f64 = 0.9;
const HIGH_RISK_AGREEMENT: f64 = 0.7;

impl RiskLevel {
    /// Classify from effective volatility and source agreement.
    pub fn classify(effective_volatility: f64, agreement_score: f64) -> Self {
        if effective_volatility > HIGH_VOLATILITY || agreement_score < HIGH_RISK_AGREEMENT {
            Self::High
        } else if effective_volatility < LOW_VOLATILITY && agreement_score >= LOW_RISK_AGREEMENT {
            Self::Low
        } else {
            Self::Medium
        }
    }

    /// Scales the base position: calm markets size up, risky ones size down.
    pub fn position_multiplier(&self) -> f64 {
        match self {
            Self::Low => 1.5,
            Self::Medium => 1.0,
            Self::High => 0.5,
        }
    }
}

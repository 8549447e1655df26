//! Engine configuration — an explicit struct, not ambient globals.
//!
//! Every tunable of the pipeline lives here with a serde default, so a TOML
//! config file may override any subset of fields. Validation happens once at
//! engine construction, not per evaluation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::risk::RiskProfile;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Full configuration surface of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub rsi_period: usize,
    pub sma_short: usize,
    pub sma_long: usize,
    pub ema_short: usize,
    pub ema_long: usize,
    pub macd_signal_period: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub stochastic_period: usize,
    pub volatility_period: usize,
    pub volume_avg_period: usize,

    /// Below this agreement score the action is forced to HOLD.
    pub agreement_threshold: f64,
    /// Above this price discrepancy an extra confidence penalty applies.
    pub discrepancy_penalty_threshold: f64,
    pub min_confidence: f64,
    pub max_confidence: f64,
    /// Confidence ceiling when running on a single source.
    pub degraded_confidence_cap: f64,

    pub volatility_floor: f64,
    /// Position budget as a fraction of capital before confidence scaling.
    pub base_position_pct: f64,
    pub risk_profile: RiskProfile,

    pub history_capacity: usize,
    pub outcome_match_tolerance_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            sma_short: 20,
            sma_long: 50,
            ema_short: 12,
            ema_long: 26,
            macd_signal_period: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            stochastic_period: 14,
            volatility_period: 20,
            volume_avg_period: 5,
            agreement_threshold: 0.6,
            discrepancy_penalty_threshold: 0.02,
            min_confidence: 0.1,
            max_confidence: 0.95,
            degraded_confidence_cap: 0.70,
            volatility_floor: 0.02,
            base_position_pct: 0.1,
            risk_profile: RiskProfile::Balanced,
            history_capacity: 500,
            outcome_match_tolerance_secs: 60,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Minimum bar count required to compute the full indicator snapshot.
    pub fn required_lookback(&self) -> usize {
        [
            self.rsi_period + 1,
            self.ema_long + self.macd_signal_period,
            self.sma_long,
            self.sma_short,
            self.bollinger_period,
            self.stochastic_period,
            self.volatility_period + 1,
            self.volume_avg_period,
        ]
        .into_iter()
        .max()
        .expect("non-empty lookback table")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, v: usize) -> Result<(), ConfigError> {
            if v == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be >= 1")));
            }
            Ok(())
        }
        fn unit_range(name: &str, v: f64) -> Result<(), ConfigError> {
            if !(0.0..=1.0).contains(&v) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be in [0, 1], got {v}"
                )));
            }
            Ok(())
        }

        positive("rsi_period", self.rsi_period)?;
        positive("sma_short", self.sma_short)?;
        positive("sma_long", self.sma_long)?;
        positive("ema_short", self.ema_short)?;
        positive("ema_long", self.ema_long)?;
        positive("macd_signal_period", self.macd_signal_period)?;
        positive("bollinger_period", self.bollinger_period)?;
        positive("stochastic_period", self.stochastic_period)?;
        positive("volatility_period", self.volatility_period)?;
        positive("volume_avg_period", self.volume_avg_period)?;
        positive("history_capacity", self.history_capacity)?;

        if self.ema_short >= self.ema_long {
            return Err(ConfigError::Invalid(format!(
                "ema_short ({}) must be below ema_long ({})",
                self.ema_short, self.ema_long
            )));
        }
        if self.sma_short >= self.sma_long {
            return Err(ConfigError::Invalid(format!(
                "sma_short ({}) must be below sma_long ({})",
                self.sma_short, self.sma_long
            )));
        }
        if !(self.bollinger_std_dev.is_finite() && self.bollinger_std_dev > 0.0) {
            return Err(ConfigError::Invalid(
                "bollinger_std_dev must be positive and finite".into(),
            ));
        }

        unit_range("agreement_threshold", self.agreement_threshold)?;
        unit_range("min_confidence", self.min_confidence)?;
        unit_range("max_confidence", self.max_confidence)?;
        unit_range("degraded_confidence_cap", self.degraded_confidence_cap)?;
        unit_range("base_position_pct", self.base_position_pct)?;
        if self.min_confidence >= self.max_confidence {
            return Err(ConfigError::Invalid(
                "min_confidence must be below max_confidence".into(),
            ));
        }
        if !(self.discrepancy_penalty_threshold.is_finite()
            && self.discrepancy_penalty_threshold >= 0.0)
        {
            return Err(ConfigError::Invalid(
                "discrepancy_penalty_threshold must be non-negative".into(),
            ));
        }
        if !(self.volatility_floor.is_finite() && self.volatility_floor > 0.0) {
            return Err(ConfigError::Invalid(
                "volatility_floor must be positive".into(),
            ));
        }

        Ok(())
    }
}

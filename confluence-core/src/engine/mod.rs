//! Decision composer — orchestrates the pipeline in strict order.
//!
//! bars → snapshot → signal → reconciliation → confidence → zones → decision.
//! Every stage either succeeds or fails with a typed error; no stage is
//! skipped and no partially-valid decision is ever emitted. The only side
//! effect is the final append to the tracker.

pub mod reasoning;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::confidence;
use crate::config::{ConfigError, EngineConfig};
use crate::data::QuoteProvider;
use crate::domain::{
    validate_series, DecisionId, DecisionRecord, Outcome, PriceBar, TradeDecision,
};
use crate::error::EngineError;
use crate::indicators::source_quote;
use crate::reconcile::{reconcile, ReconciliationResult};
use crate::risk::{
    compute_zones, effective_volatility, estimate_hold_time, position_size_pct, RiskLevel,
};
use crate::signal::{RuleBasedScoring, ScoringStrategy};
use crate::tracker::{DecisionRef, PerformanceMetrics, PerformanceTracker};

/// The evaluation engine: configuration, a scoring strategy, and the
/// decision tracker.
///
/// Evaluations are pure functions of their inputs (plus the history append),
/// so one engine may serve many symbols concurrently.
pub struct Engine {
    config: EngineConfig,
    scoring: Box<dyn ScoringStrategy>,
    tracker: PerformanceTracker,
}

impl Engine {
    /// Engine with the default rule-based scorer.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_scoring(config, Box::new(RuleBasedScoring::default()))
    }

    /// Engine with a custom scoring strategy.
    pub fn with_scoring(
        config: EngineConfig,
        scoring: Box<dyn ScoringStrategy>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let tracker = PerformanceTracker::new(
            config.history_capacity,
            config.outcome_match_tolerance_secs,
        );
        Ok(Self {
            config,
            scoring,
            tracker,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate with the current wall clock as the decision timestamp.
    pub fn evaluate(
        &self,
        symbol: &str,
        primary_bars: &[PriceBar],
        secondary_bars: Option<&[PriceBar]>,
    ) -> Result<TradeDecision, EngineError> {
        self.evaluate_at(symbol, primary_bars, secondary_bars, Utc::now())
    }

    /// Evaluate at an explicit instant.
    ///
    /// Identical inputs and `as_of` produce a bit-identical decision, which
    /// is what replay and tests rely on.
    pub fn evaluate_at(
        &self,
        symbol: &str,
        primary_bars: &[PriceBar],
        secondary_bars: Option<&[PriceBar]>,
        as_of: DateTime<Utc>,
    ) -> Result<TradeDecision, EngineError> {
        validate_series(primary_bars)?;
        let primary = source_quote("primary", primary_bars, &self.config)?;

        // A broken secondary degrades to single-source mode; only primary
        // problems abort the evaluation.
        let secondary = match secondary_bars {
            Some(bars) => {
                let built = validate_series(bars)
                    .and_then(|()| source_quote("secondary", bars, &self.config));
                match built {
                    Ok(quote) => Some(quote),
                    Err(error) => {
                        warn!(symbol, %error, "secondary source failed, degrading");
                        None
                    }
                }
            }
            None => None,
        };

        let signal = self.scoring.score(&primary.indicators);
        let recon = match &secondary {
            Some(sec) => reconcile(&primary, sec),
            None => ReconciliationResult::single_source(),
        };

        let outcome = confidence::calculate(&signal, &recon, &primary.indicators, &self.config);

        let ev = effective_volatility(
            primary.indicators.volatility,
            self.config.volatility_floor,
        );
        let params = self.config.risk_profile.params();
        let level = RiskLevel::classify(ev, recon.agreement_score);
        let zones = compute_zones(primary.price, outcome.action, ev, &params)?;
        let size = position_size_pct(
            self.config.base_position_pct,
            outcome.confidence,
            level,
            &params,
        );
        let hold_time = estimate_hold_time(&signal);
        let reasoning =
            reasoning::compose(&signal, &recon, &outcome, &primary.indicators, &self.config);

        let decision = TradeDecision {
            id: DecisionId::derive(symbol, as_of, outcome.action, outcome.confidence_pct),
            symbol: symbol.to_string(),
            action: outcome.action,
            confidence_pct: outcome.confidence_pct,
            entry_zone: zones.entry_zone,
            target: zones.target,
            stop_loss: zones.stop_loss,
            risk_reward_ratio: zones.risk_reward_ratio,
            position_size_pct: size,
            hold_time,
            degraded: recon.degraded,
            reasoning,
            timestamp: as_of,
        };

        debug!(
            symbol,
            action = %decision.action,
            confidence_pct = decision.confidence_pct,
            degraded = decision.degraded,
            "decision composed"
        );
        self.tracker.append(decision.clone());
        Ok(decision)
    }

    /// Fetch bars from providers, then evaluate.
    ///
    /// A failing primary is fatal (`SourceUnavailable`); a failing secondary
    /// only degrades the evaluation to single-source mode.
    pub fn evaluate_from_providers(
        &self,
        symbol: &str,
        primary: &dyn QuoteProvider,
        secondary: Option<&dyn QuoteProvider>,
    ) -> Result<TradeDecision, EngineError> {
        let lookback = self.config.required_lookback();

        let primary_bars = primary.price_bars(symbol, lookback).map_err(|error| {
            EngineError::SourceUnavailable {
                source_name: primary.name().to_string(),
                reason: error.to_string(),
            }
        })?;
        if primary_bars.is_empty() {
            return Err(EngineError::SourceUnavailable {
                source_name: primary.name().to_string(),
                reason: "returned no bars".into(),
            });
        }

        let secondary_bars = secondary.and_then(|provider| {
            match provider.price_bars(symbol, lookback) {
                Ok(bars) if !bars.is_empty() => Some(bars),
                Ok(_) => {
                    warn!(symbol, provider = provider.name(), "secondary returned no bars");
                    None
                }
                Err(error) => {
                    warn!(symbol, provider = provider.name(), %error, "secondary fetch failed");
                    None
                }
            }
        });

        self.evaluate(symbol, &primary_bars, secondary_bars.as_deref())
    }

    /// Attach an outcome to a prior decision; soft-miss returns false.
    pub fn record_outcome(&self, target: &DecisionRef, outcome: Outcome) -> bool {
        self.tracker.record_outcome(target, outcome)
    }

    /// Most recent decisions first, at most `limit`.
    pub fn history(&self, limit: usize) -> Vec<DecisionRecord> {
        self.tracker.history(limit)
    }

    pub fn metrics(&self) -> PerformanceMetrics {
        self.tracker.metrics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ProviderError, SyntheticProvider};
    use crate::domain::Action;
    use chrono::TimeZone;

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 15, 0, 0).unwrap()
    }

    struct DeadProvider;

    impl QuoteProvider for DeadProvider {
        fn name(&self) -> &str {
            "dead"
        }

        fn price_bars(&self, _: &str, _: usize) -> Result<Vec<PriceBar>, ProviderError> {
            Err(ProviderError::Unavailable("connection refused".into()))
        }
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let mut config = EngineConfig::default();
        config.rsi_period = 0;
        assert!(Engine::new(config).is_err());
    }

    #[test]
    fn primary_provider_failure_is_fatal() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let err = engine
            .evaluate_from_providers("AAPL", &DeadProvider, None)
            .unwrap_err();
        assert!(matches!(err, EngineError::SourceUnavailable { .. }));
        assert!(engine.history(10).is_empty());
    }

    #[test]
    fn secondary_provider_failure_degrades() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let primary = SyntheticProvider::new(42);
        let decision = engine
            .evaluate_from_providers("AAPL", &primary, Some(&DeadProvider))
            .unwrap();
        assert!(decision.degraded);
        assert!(decision.confidence_pct <= 70);
    }

    #[test]
    fn invalid_secondary_bars_degrade() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let primary_bars = SyntheticProvider::new(42).generate("AAPL", 60);
        let mut bad_secondary = primary_bars.clone();
        bad_secondary[10].close = -5.0;

        let decision = engine
            .evaluate_at("AAPL", &primary_bars, Some(&bad_secondary), fixed_instant())
            .unwrap();
        assert!(decision.degraded);
    }

    #[test]
    fn invalid_primary_bars_abort() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let mut bars = SyntheticProvider::new(42).generate("AAPL", 60);
        bars[5].volume = 0;
        assert!(matches!(
            engine.evaluate_at("AAPL", &bars, None, fixed_instant()),
            Err(EngineError::InvalidSeries(_))
        ));
    }

    #[test]
    fn evaluation_appends_to_history() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let bars = SyntheticProvider::new(42).generate("AAPL", 60);
        let decision = engine
            .evaluate_at("AAPL", &bars, None, fixed_instant())
            .unwrap();
        let history = engine.history(10);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].decision.id, decision.id);
        assert!(history[0].outcome.is_none());
    }

    #[test]
    fn dual_source_from_jittered_secondary() {
        use crate::data::JitterProvider;
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let primary = SyntheticProvider::new(42);
        let secondary = JitterProvider::new(primary.clone(), 7, 0.01);
        let decision = engine
            .evaluate_from_providers("AAPL", &primary, Some(&secondary))
            .unwrap();
        assert!(!decision.degraded);
        assert!(matches!(
            decision.action,
            Action::Buy | Action::Sell | Action::Hold
        ));
        assert!((10..=95).contains(&decision.confidence_pct));
    }
}

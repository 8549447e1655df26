//! Reasoning text — one short factual statement per triggered rule, plus
//! agreement/discrepancy commentary and an action-specific close.
//!
//! Statements are ordered: factors in evaluation order, then volume, then
//! source commentary, then the closing line. The wording carries the actual
//! numbers so a reader can audit the decision against the snapshot.

use crate::confidence::ConfidenceOutcome;
use crate::config::EngineConfig;
use crate::domain::{Action, IndicatorSet, VolumeTrend};
use crate::reconcile::ReconciliationResult;
use crate::signal::{Direction, DirectionalSignal, FactorKind};

pub fn compose(
    signal: &DirectionalSignal,
    recon: &ReconciliationResult,
    outcome: &ConfidenceOutcome,
    indicators: &IndicatorSet,
    config: &EngineConfig,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if signal.factors.is_empty() {
        reasons.push("no factor rules triggered; technical picture inconclusive".to_string());
    }

    for factor in &signal.factors {
        let bullish = factor.direction == Direction::Bullish;
        let statement = match factor.kind {
            FactorKind::Rsi => format!(
                "RSI at {:.1} signals {} conditions",
                indicators.rsi,
                if bullish { "oversold" } else { "overbought" }
            ),
            FactorKind::Macd => format!(
                "MACD histogram at {:+.4} shows {} momentum",
                indicators.macd.histogram,
                if bullish { "bullish" } else { "bearish" }
            ),
            FactorKind::MaTrend => format!(
                "price {:.2} trading {} SMA{} and SMA{}",
                indicators.current_price,
                if bullish { "above" } else { "below" },
                config.sma_short,
                config.sma_long
            ),
            FactorKind::Bollinger => format!(
                "price {} the {} Bollinger band at {:.2}",
                if bullish { "below" } else { "above" },
                if bullish { "lower" } else { "upper" },
                if bullish {
                    indicators.bollinger.lower
                } else {
                    indicators.bollinger.upper
                }
            ),
        };
        reasons.push(statement);
    }

    match indicators.volume.trend {
        VolumeTrend::Increasing => reasons.push(format!(
            "volume running {:.1}x its {}-bar average",
            indicators.volume.current / indicators.volume.average,
            config.volume_avg_period
        )),
        VolumeTrend::Decreasing => reasons.push(format!(
            "volume fading to {:.1}x its {}-bar average",
            indicators.volume.current / indicators.volume.average,
            config.volume_avg_period
        )),
        VolumeTrend::Stable => {}
    }

    if recon.degraded {
        reasons.push("secondary source unavailable; evaluating on the primary source alone".into());
    } else {
        let agreed = recon.per_factor.iter().filter(|f| f.agree).count();
        reasons.push(format!(
            "sources agree on {agreed} of {} comparable factors (score {:.2})",
            recon.per_factor.len(),
            recon.agreement_score
        ));
        if recon.price_discrepancy > config.discrepancy_penalty_threshold {
            reasons.push(format!(
                "price discrepancy of {:.1}% between sources exceeds {:.1}%; confidence reduced",
                recon.price_discrepancy * 100.0,
                config.discrepancy_penalty_threshold * 100.0
            ));
        }
    }

    if outcome.forced_hold {
        reasons.push(format!(
            "source agreement {:.2} below the {:.2} threshold; holding despite directional factors",
            recon.agreement_score, config.agreement_threshold
        ));
    }

    reasons.push(match outcome.action {
        Action::Buy => "composite bias is bullish; entry zone set below market to favor pullback fills".into(),
        Action::Sell => "composite bias is bearish; entry zone set above market to favor bounce fills".into(),
        Action::Hold => "mixed signals suggest sideways movement; staying flat".into(),
    });

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BollingerBands, MacdSet, VolumeProfile};
    use crate::signal::SignalFactor;

    fn indicators() -> IndicatorSet {
        IndicatorSet {
            rsi: 25.0,
            macd: MacdSet {
                value: 0.5,
                signal_line: 0.1,
                histogram: 0.4,
            },
            sma20: 99.0,
            sma50: 98.0,
            ema12: 100.0,
            ema26: 99.5,
            bollinger: BollingerBands {
                upper: 104.0,
                middle: 100.0,
                lower: 96.0,
            },
            stochastic: 40.0,
            volume: VolumeProfile {
                current: 1_500.0,
                average: 1_000.0,
                trend: VolumeTrend::Increasing,
            },
            volatility: 0.03,
            current_price: 100.0,
        }
    }

    fn buy_outcome() -> ConfidenceOutcome {
        ConfidenceOutcome {
            action: Action::Buy,
            confidence: 0.95,
            confidence_pct: 95,
            forced_hold: false,
        }
    }

    fn dual_recon(agreement: f64, discrepancy: f64) -> ReconciliationResult {
        ReconciliationResult {
            agreement_score: agreement,
            price_discrepancy: discrepancy,
            per_factor: Vec::new(),
            degraded: false,
        }
    }

    fn buy_signal() -> DirectionalSignal {
        DirectionalSignal {
            action: Action::Buy,
            strength: 0.83,
            direction: Direction::Bullish,
            factors: vec![
                SignalFactor::new(FactorKind::Rsi, Direction::Bullish, 1.0),
                SignalFactor::new(FactorKind::Macd, Direction::Bullish, 1.0),
            ],
        }
    }

    #[test]
    fn one_statement_per_factor_plus_commentary() {
        let reasons = compose(
            &buy_signal(),
            &dual_recon(0.9, 0.005),
            &buy_outcome(),
            &indicators(),
            &EngineConfig::default(),
        );
        // 2 factors + volume + agreement + closing
        assert_eq!(reasons.len(), 5);
        assert!(reasons[0].contains("RSI at 25.0"));
        assert!(reasons[0].contains("oversold"));
        assert!(reasons[1].contains("MACD"));
        assert!(reasons.last().unwrap().contains("bullish"));
    }

    #[test]
    fn discrepancy_statement_appears_above_threshold() {
        let reasons = compose(
            &buy_signal(),
            &dual_recon(0.9, 0.03),
            &buy_outcome(),
            &indicators(),
            &EngineConfig::default(),
        );
        assert!(reasons.iter().any(|r| r.contains("discrepancy")));
    }

    #[test]
    fn degraded_mode_is_called_out() {
        let reasons = compose(
            &buy_signal(),
            &ReconciliationResult::single_source(),
            &buy_outcome(),
            &indicators(),
            &EngineConfig::default(),
        );
        assert!(reasons.iter().any(|r| r.contains("primary source alone")));
        assert!(!reasons.iter().any(|r| r.contains("sources agree")));
    }

    #[test]
    fn forced_hold_is_explained() {
        let outcome = ConfidenceOutcome {
            action: Action::Hold,
            confidence: 0.5,
            confidence_pct: 50,
            forced_hold: true,
        };
        let reasons = compose(
            &buy_signal(),
            &dual_recon(0.4, 0.0),
            &outcome,
            &indicators(),
            &EngineConfig::default(),
        );
        assert!(reasons
            .iter()
            .any(|r| r.contains("holding despite directional factors")));
        assert!(reasons.last().unwrap().contains("sideways"));
    }

    #[test]
    fn empty_factors_are_inconclusive() {
        let mut ind = indicators();
        ind.volume.trend = VolumeTrend::Stable;
        let outcome = ConfidenceOutcome {
            action: Action::Hold,
            confidence: 0.5,
            confidence_pct: 50,
            forced_hold: false,
        };
        let reasons = compose(
            &DirectionalSignal::neutral(),
            &dual_recon(1.0, 0.0),
            &outcome,
            &ind,
            &EngineConfig::default(),
        );
        assert!(reasons[0].contains("inconclusive"));
    }
}

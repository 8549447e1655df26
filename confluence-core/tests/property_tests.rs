//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Confidence is always clamped into [10, 95]
//! 2. Agreement below threshold always forces HOLD
//! 3. Entry zones are ordered and risk/reward is zero exactly for HOLD
//! 4. RSI stays in [0, 100] and pegs at 100 when no losses occur
//! 5. Position size respects the profile bounds

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use confluence_core::confidence;
use confluence_core::domain::{
    Action, BollingerBands, IndicatorSet, MacdSet, PriceBar, VolumeProfile, VolumeTrend,
};
use confluence_core::indicators::rsi;
use confluence_core::reconcile::ReconciliationResult;
use confluence_core::risk::{compute_zones, position_size_pct, RiskLevel, RiskProfile};
use confluence_core::signal::{Direction, DirectionalSignal};
use confluence_core::EngineConfig;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_indicator_set() -> impl Strategy<Value = IndicatorSet> {
    (
        0.0..100.0_f64,          // rsi
        -2.0..2.0_f64,           // histogram
        10.0..500.0_f64,         // price
        0.0..0.2_f64,            // volatility
        0.5..3.0_f64,            // volume ratio
    )
        .prop_map(|(rsi, histogram, price, volatility, volume_ratio)| IndicatorSet {
            rsi,
            macd: MacdSet {
                value: histogram,
                signal_line: 0.0,
                histogram,
            },
            sma20: price * 0.99,
            sma50: price * 0.98,
            ema12: price,
            ema26: price,
            bollinger: BollingerBands {
                upper: price * 1.02,
                middle: price,
                lower: price * 0.98,
            },
            stochastic: 50.0,
            volume: VolumeProfile {
                current: 1_000.0 * volume_ratio,
                average: 1_000.0,
                trend: VolumeTrend::Stable,
            },
            volatility,
            current_price: price,
        })
}

fn arb_signal() -> impl Strategy<Value = DirectionalSignal> {
    (0.0..=1.0_f64, prop::sample::select(vec![Action::Buy, Action::Sell, Action::Hold])).prop_map(
        |(strength, action)| {
            let direction = match action {
                Action::Buy => Direction::Bullish,
                Action::Sell => Direction::Bearish,
                Action::Hold => Direction::Neutral,
            };
            DirectionalSignal {
                action,
                strength,
                direction,
                factors: Vec::new(),
            }
        },
    )
}

fn arb_recon() -> impl Strategy<Value = ReconciliationResult> {
    (0.0..=1.0_f64, 0.0..0.5_f64, prop::bool::ANY).prop_map(
        |(agreement_score, price_discrepancy, degraded)| ReconciliationResult {
            agreement_score,
            price_discrepancy,
            per_factor: Vec::new(),
            degraded,
        },
    )
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop::sample::select(vec![Action::Buy, Action::Sell, Action::Hold])
}

fn arb_profile() -> impl Strategy<Value = RiskProfile> {
    prop::sample::select(vec![
        RiskProfile::Conservative,
        RiskProfile::Balanced,
        RiskProfile::Aggressive,
    ])
}

// ── 1. Confidence bounds ─────────────────────────────────────────────

proptest! {
    /// For any finite inputs, the rounded confidence lands in [10, 95].
    #[test]
    fn confidence_pct_is_bounded(
        signal in arb_signal(),
        recon in arb_recon(),
        indicators in arb_indicator_set(),
    ) {
        let outcome = confidence::calculate(
            &signal,
            &recon,
            &indicators,
            &EngineConfig::default(),
        );
        prop_assert!((10..=95).contains(&outcome.confidence_pct));
        prop_assert!(outcome.confidence.is_finite());
    }

    /// Degraded mode never exceeds the configured cap.
    #[test]
    fn degraded_confidence_respects_the_cap(
        signal in arb_signal(),
        indicators in arb_indicator_set(),
        discrepancy in 0.0..0.1_f64,
    ) {
        let recon = ReconciliationResult {
            agreement_score: 1.0,
            price_discrepancy: discrepancy,
            per_factor: Vec::new(),
            degraded: true,
        };
        let outcome = confidence::calculate(
            &signal,
            &recon,
            &indicators,
            &EngineConfig::default(),
        );
        prop_assert!(outcome.confidence_pct <= 70);
    }
}

// ── 2. Forced HOLD ───────────────────────────────────────────────────

proptest! {
    /// Below-threshold agreement forces HOLD no matter how strong the signal.
    #[test]
    fn low_agreement_always_holds(
        strength in 0.0..=1.0_f64,
        agreement in 0.0..0.6_f64,
        indicators in arb_indicator_set(),
    ) {
        let signal = DirectionalSignal {
            action: Action::Buy,
            strength,
            direction: Direction::Bullish,
            factors: Vec::new(),
        };
        let recon = ReconciliationResult {
            agreement_score: agreement,
            price_discrepancy: 0.0,
            per_factor: Vec::new(),
            degraded: false,
        };
        let outcome = confidence::calculate(
            &signal,
            &recon,
            &indicators,
            &EngineConfig::default(),
        );
        prop_assert_eq!(outcome.action, Action::Hold);
    }
}

// ── 3. Zones and risk/reward ─────────────────────────────────────────

proptest! {
    /// Entry zones are ordered for every action; rr is zero iff HOLD.
    #[test]
    fn zones_are_ordered_and_rr_matches_action(
        price in 1.0..1_000.0_f64,
        volatility in 0.0..0.5_f64,
        action in arb_action(),
        profile in arb_profile(),
    ) {
        let ev = volatility.max(0.02);
        let zones = compute_zones(price, action, ev, &profile.params()).unwrap();

        prop_assert!(zones.entry_zone.low <= zones.entry_zone.high);
        if action == Action::Hold {
            prop_assert_eq!(zones.risk_reward_ratio, 0.0);
            prop_assert_eq!(zones.target, price);
            prop_assert_eq!(zones.stop_loss, price);
        } else {
            prop_assert!(zones.risk_reward_ratio > 0.0);
        }
    }
}

// ── 4. RSI bounds ────────────────────────────────────────────────────

proptest! {
    /// RSI of any positive close series stays within [0, 100].
    #[test]
    fn rsi_is_bounded(closes in prop::collection::vec(1.0..1_000.0_f64, 15..40)) {
        let bars = bars_from_closes(&closes);
        let value = rsi(&bars, 14).unwrap();
        prop_assert!((0.0..=100.0).contains(&value));
    }

    /// A window with no losses pegs RSI at exactly 100.
    #[test]
    fn rsi_without_losses_is_exactly_100(
        start in 1.0..500.0_f64,
        steps in prop::collection::vec(0.0..5.0_f64, 15..30),
    ) {
        let mut close = start;
        let closes: Vec<f64> = steps
            .iter()
            .map(|step| {
                close += step;
                close
            })
            .collect();
        let bars = bars_from_closes(&closes);
        let value = rsi(&bars, 14).unwrap();
        prop_assert_eq!(value, 100.0);
    }
}

// ── 5. Position sizing ───────────────────────────────────────────────

proptest! {
    /// Sizing stays inside the profile bounds for any confidence and level.
    #[test]
    fn position_size_respects_bounds(
        base in 0.01..0.5_f64,
        confidence in 0.1..=0.95_f64,
        profile in arb_profile(),
        level in prop::sample::select(vec![RiskLevel::Low, RiskLevel::Medium, RiskLevel::High]),
    ) {
        let params = profile.params();
        let pct = position_size_pct(base, confidence, level, &params);
        prop_assert!(pct >= params.min_position_pct);
        prop_assert!(pct <= params.max_position_pct);
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                timestamp: base + Duration::hours(i as i64),
                open,
                high: open.max(close) + 0.5,
                low: (open.min(close) - 0.5).max(0.01),
                close,
                volume: 1_000,
            }
        })
        .collect()
}

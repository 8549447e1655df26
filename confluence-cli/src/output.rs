//! Decision rendering — plain-text block or JSON line.

use confluence_core::domain::{HoldBucket, TradeDecision};
use confluence_core::tracker::PerformanceMetrics;

pub fn format_decision(decision: &TradeDecision) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} — {} (confidence {}%)\n",
        decision.symbol, decision.action, decision.confidence_pct
    ));
    out.push_str(&format!(
        "  entry zone    {:.2} – {:.2}\n",
        decision.entry_zone.low, decision.entry_zone.high
    ));
    out.push_str(&format!("  target        {:.2}\n", decision.target));
    out.push_str(&format!("  stop loss     {:.2}\n", decision.stop_loss));
    out.push_str(&format!(
        "  risk/reward   {:.2}\n",
        decision.risk_reward_ratio
    ));
    out.push_str(&format!(
        "  position      {:.1}% of capital\n",
        decision.position_size_pct
    ));
    out.push_str(&format!(
        "  hold          ~{:.1}h ({})\n",
        decision.hold_time.hours,
        bucket_label(decision.hold_time.bucket)
    ));
    if decision.degraded {
        out.push_str("  mode          single-source (degraded)\n");
    }
    out.push_str("  reasoning:\n");
    for reason in &decision.reasoning {
        out.push_str(&format!("    - {reason}\n"));
    }
    out.push_str(&format!(
        "  id {} @ {}\n",
        decision.id.short(),
        decision.timestamp.to_rfc3339()
    ));

    out
}

pub fn format_metrics(metrics: &PerformanceMetrics) -> String {
    format!(
        "decisions: {}  wins: {}  accuracy: {:.1}%  avg confidence: {:.1}%",
        metrics.total_decisions,
        metrics.success_count,
        metrics.accuracy * 100.0,
        metrics.avg_confidence * 100.0
    )
}

fn bucket_label(bucket: HoldBucket) -> &'static str {
    match bucket {
        HoldBucket::Scalp => "scalp",
        HoldBucket::Day => "day trade",
        HoldBucket::Swing => "swing",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use confluence_core::domain::{Action, DecisionId, EntryZone, HoldTime};

    fn sample() -> TradeDecision {
        let timestamp = Utc.with_ymd_and_hms(2024, 6, 3, 15, 0, 0).unwrap();
        TradeDecision {
            id: DecisionId::derive("AAPL", timestamp, Action::Buy, 82),
            symbol: "AAPL".into(),
            action: Action::Buy,
            confidence_pct: 82,
            entry_zone: EntryZone {
                low: 98.2,
                high: 100.4,
            },
            target: 104.3,
            stop_loss: 96.1,
            risk_reward_ratio: 4.0 / 3.0,
            position_size_pct: 8.0,
            hold_time: HoldTime::from_hours(4.6),
            degraded: true,
            reasoning: vec!["RSI at 25.0 signals oversold conditions".into()],
            timestamp,
        }
    }

    #[test]
    fn text_block_carries_the_key_fields() {
        let text = format_decision(&sample());
        assert!(text.contains("AAPL — BUY (confidence 82%)"));
        assert!(text.contains("entry zone    98.20 – 100.40"));
        assert!(text.contains("single-source (degraded)"));
        assert!(text.contains("- RSI at 25.0"));
    }

    #[test]
    fn metrics_line_is_compact() {
        let metrics = PerformanceMetrics {
            total_decisions: 10,
            success_count: 6,
            accuracy: 0.6,
            avg_confidence: 0.55,
        };
        let line = format_metrics(&metrics);
        assert!(line.contains("decisions: 10"));
        assert!(line.contains("accuracy: 60.0%"));
    }
}

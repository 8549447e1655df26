//! Rolling performance metrics over the retained decision history.
//!
//! Metrics are maintained incrementally: counters adjust on every append,
//! eviction, and outcome attachment, so a snapshot is O(1) and always
//! consistent with the records still retained.

use serde::{Deserialize, Serialize};

use crate::domain::DecisionRecord;

/// Aggregate accuracy statistics for the retained history.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_decisions: usize,
    pub success_count: usize,
    /// `success_count / total_decisions`; 0 when the history is empty.
    pub accuracy: f64,
    /// Mean confidence fraction across retained decisions.
    pub avg_confidence: f64,
}

/// Incremental counters behind `PerformanceMetrics`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MetricCounters {
    total: usize,
    success: usize,
    confidence_sum: f64,
}

impl MetricCounters {
    /// Rebuild from scratch, e.g. when adopting a pre-populated repository.
    pub(crate) fn from_records(records: &[DecisionRecord]) -> Self {
        let mut counters = Self::default();
        for record in records {
            counters.on_append(record.decision.confidence_pct);
            if let Some(outcome) = &record.outcome {
                counters.on_outcome(outcome.success);
            }
        }
        counters
    }

    pub(crate) fn on_append(&mut self, confidence_pct: u8) {
        self.total += 1;
        self.confidence_sum += confidence_pct as f64 / 100.0;
    }

    pub(crate) fn on_evict(&mut self, record: &DecisionRecord) {
        self.total = self.total.saturating_sub(1);
        self.confidence_sum -= record.decision.confidence_pct as f64 / 100.0;
        if record.outcome.map_or(false, |outcome| outcome.success) {
            self.success = self.success.saturating_sub(1);
        }
    }

    pub(crate) fn on_outcome(&mut self, success: bool) {
        if success {
            self.success += 1;
        }
    }

    pub(crate) fn snapshot(&self) -> PerformanceMetrics {
        let (accuracy, avg_confidence) = if self.total == 0 {
            (0.0, 0.0)
        } else {
            (
                self.success as f64 / self.total as f64,
                self.confidence_sum / self.total as f64,
            )
        };
        PerformanceMetrics {
            total_decisions: self.total,
            success_count: self.success,
            accuracy,
            avg_confidence,
        }
    }
}

//! Performance tracker — decision history and rolling accuracy metrics.
//!
//! The tracker is the engine's only shared mutable state. Appends and
//! outcome updates serialize behind one mutex (single-writer discipline);
//! reads take the same lock briefly and return owned snapshots, so callers
//! never observe history and metrics that disagree.

pub mod metrics;
pub mod repository;

pub use metrics::PerformanceMetrics;
pub use repository::{DecisionRef, DecisionRepository, InMemoryRepository};

use std::sync::Mutex;

use chrono::Duration;
use tracing::debug;

use crate::domain::{DecisionRecord, Outcome, TradeDecision};

use metrics::MetricCounters;

struct TrackerInner {
    repository: Box<dyn DecisionRepository>,
    counters: MetricCounters,
}

/// Append-only decision log with incrementally maintained metrics.
pub struct PerformanceTracker {
    inner: Mutex<TrackerInner>,
    outcome_tolerance: Duration,
}

impl PerformanceTracker {
    /// Tracker over the default bounded in-memory repository.
    pub fn new(capacity: usize, outcome_tolerance_secs: u64) -> Self {
        Self::with_repository(
            Box::new(InMemoryRepository::new(capacity)),
            outcome_tolerance_secs,
        )
    }

    /// Tracker over an injected repository. Counters are rebuilt from the
    /// repository's current contents so adopted histories report correctly.
    pub fn with_repository(
        repository: Box<dyn DecisionRepository>,
        outcome_tolerance_secs: u64,
    ) -> Self {
        let existing = repository.recent(usize::MAX);
        let counters = MetricCounters::from_records(&existing);
        Self {
            inner: Mutex::new(TrackerInner {
                repository,
                counters,
            }),
            outcome_tolerance: Duration::seconds(outcome_tolerance_secs as i64),
        }
    }

    /// Append a freshly composed decision to the history.
    pub fn append(&self, decision: TradeDecision) {
        let mut inner = self.lock();
        let confidence_pct = decision.confidence_pct;
        if let Some(evicted) = inner.repository.append(decision) {
            inner.counters.on_evict(&evicted);
        }
        inner.counters.on_append(confidence_pct);
    }

    /// Attach an outcome to a prior decision.
    ///
    /// Returns false on a soft miss: nothing matched within tolerance, or the
    /// match was already resolved. Outcome arrival is best-effort, so a miss
    /// is not an error.
    pub fn record_outcome(&self, target: &DecisionRef, outcome: Outcome) -> bool {
        let mut inner = self.lock();
        let attached = inner
            .repository
            .attach_outcome(target, outcome, self.outcome_tolerance);
        if attached {
            inner.counters.on_outcome(outcome.success);
        } else {
            debug!(?target, "no matching unresolved decision, dropping outcome");
        }
        attached
    }

    /// Most recent records first, at most `limit`.
    pub fn history(&self, limit: usize) -> Vec<DecisionRecord> {
        self.lock().repository.recent(limit)
    }

    /// Consistent snapshot of the rolling metrics.
    pub fn metrics(&self) -> PerformanceMetrics {
        self.lock().counters.snapshot()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TrackerInner> {
        self.inner.lock().expect("tracker mutex poisoned")
    }
}

//! Decision repository — append-only bounded storage behind a trait.
//!
//! The tracker takes the repository as an injected dependency so alternative
//! backends (a file, a database) can slot in without touching the tracker's
//! metric bookkeeping. The in-memory ring is the default.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

use crate::domain::{DecisionId, DecisionRecord, Outcome, TradeDecision};

/// How a caller refers to a prior decision when reporting an outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionRef {
    /// Exact match by content-addressed id.
    Id(DecisionId),
    /// Most recent unresolved decision for the symbol within the tolerance
    /// window around the given instant.
    SymbolAt {
        symbol: String,
        timestamp: DateTime<Utc>,
    },
}

/// Append/query/update-outcome storage for decision records.
///
/// Implementations own ordering and eviction. All mutation goes through
/// `&mut self`; the tracker serializes access behind its mutex.
pub trait DecisionRepository: Send {
    /// Append a fresh decision. Returns the evicted record when the append
    /// pushed the history past its capacity.
    fn append(&mut self, decision: TradeDecision) -> Option<DecisionRecord>;

    /// Attach an outcome to the referenced decision. Returns false when no
    /// unresolved match exists — a soft miss, not an error.
    fn attach_outcome(
        &mut self,
        target: &DecisionRef,
        outcome: Outcome,
        tolerance: Duration,
    ) -> bool;

    /// Most recent records first, at most `limit`.
    fn recent(&self, limit: usize) -> Vec<DecisionRecord>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bounded in-memory ring of decision records.
#[derive(Debug)]
pub struct InMemoryRepository {
    records: VecDeque<DecisionRecord>,
    capacity: usize,
}

impl InMemoryRepository {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "repository capacity must be >= 1");
        Self {
            records: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }
}

impl DecisionRepository for InMemoryRepository {
    fn append(&mut self, decision: TradeDecision) -> Option<DecisionRecord> {
        let evicted = if self.records.len() == self.capacity {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(DecisionRecord {
            decision,
            outcome: None,
        });
        evicted
    }

    fn attach_outcome(
        &mut self,
        target: &DecisionRef,
        outcome: Outcome,
        tolerance: Duration,
    ) -> bool {
        // Scan newest-first so SymbolAt resolves to the latest candidate.
        let found = self.records.iter_mut().rev().find(|record| {
            if record.outcome.is_some() {
                return false;
            }
            match target {
                DecisionRef::Id(id) => record.decision.id == *id,
                DecisionRef::SymbolAt { symbol, timestamp } => {
                    record.decision.symbol == *symbol
                        && (record.decision.timestamp - *timestamp).abs() <= tolerance
                }
            }
        });

        match found {
            Some(record) => {
                record.outcome = Some(outcome);
                true
            }
            None => false,
        }
    }

    fn recent(&self, limit: usize) -> Vec<DecisionRecord> {
        self.records.iter().rev().take(limit).cloned().collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

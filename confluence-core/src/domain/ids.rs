//! Decision identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::decision::Action;

/// Content-addressed decision id.
///
/// Derived with BLAKE3 over a canonical JSON encoding of the decision's
/// identifying fields, so the same symbol, instant, action, and confidence
/// always produce the same id across builds and platforms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecisionId(String);

impl DecisionId {
    pub fn derive(
        symbol: &str,
        timestamp: DateTime<Utc>,
        action: Action,
        confidence_pct: u8,
    ) -> Self {
        let canonical = serde_json::json!({
            "symbol": symbol,
            "timestamp": timestamp.timestamp_micros(),
            "action": action,
            "confidence_pct": confidence_pct,
        });
        let hash = blake3::hash(canonical.to_string().as_bytes());
        Self(hash.to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for compact display.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for DecisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 14, 30, 0).unwrap()
    }

    #[test]
    fn id_is_deterministic() {
        let a = DecisionId::derive("AAPL", at(), Action::Buy, 80);
        let b = DecisionId::derive("AAPL", at(), Action::Buy, 80);
        assert_eq!(a, b);
    }

    #[test]
    fn different_inputs_different_ids() {
        let a = DecisionId::derive("AAPL", at(), Action::Buy, 80);
        let b = DecisionId::derive("AAPL", at(), Action::Sell, 80);
        let c = DecisionId::derive("MSFT", at(), Action::Buy, 80);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn short_form_is_prefix() {
        let id = DecisionId::derive("AAPL", at(), Action::Hold, 50);
        assert_eq!(id.short().len(), 12);
        assert!(id.as_str().starts_with(id.short()));
    }
}

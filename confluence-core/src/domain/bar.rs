//! Price bar — the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// OHLCV bar for a single symbol over one sampling interval.
///
/// Bars arrive ordered per symbol. Series invariant: timestamps strictly
/// increasing, all prices positive, volume positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Basic OHLCV sanity check: finite positive prices, high/low envelope.
    pub fn is_sane(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite() && *p > 0.0)
            && self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.volume > 0
    }
}

/// Validate a bar series against the ordering and positivity invariants.
///
/// Errors name the first offending bar index so a caller can locate the bad
/// row in its source data.
pub fn validate_series(bars: &[PriceBar]) -> Result<(), EngineError> {
    if bars.is_empty() {
        return Err(EngineError::InvalidSeries("empty bar series".into()));
    }

    for (i, bar) in bars.iter().enumerate() {
        if !bar.is_sane() {
            return Err(EngineError::InvalidSeries(format!(
                "bar {i} at {} fails sanity check (non-positive or inconsistent OHLCV)",
                bar.timestamp
            )));
        }
        if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
            return Err(EngineError::InvalidSeries(format!(
                "non-increasing timestamp at bar {i}: {} follows {}",
                bar.timestamp,
                bars[i - 1].timestamp
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bar_at(hour: u32, close: f64) -> PriceBar {
        PriceBar {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, hour, 0, 0).unwrap(),
            open: close - 0.5,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn sane_series_passes() {
        let bars = vec![bar_at(0, 100.0), bar_at(1, 101.0), bar_at(2, 100.5)];
        assert!(validate_series(&bars).is_ok());
    }

    #[test]
    fn empty_series_rejected() {
        assert!(matches!(
            validate_series(&[]),
            Err(EngineError::InvalidSeries(_))
        ));
    }

    #[test]
    fn duplicate_timestamp_rejected() {
        let bars = vec![bar_at(0, 100.0), bar_at(0, 101.0)];
        let err = validate_series(&bars).unwrap_err();
        assert!(err.to_string().contains("non-increasing"));
    }

    #[test]
    fn backwards_timestamp_rejected() {
        let bars = vec![bar_at(2, 100.0), bar_at(1, 101.0)];
        assert!(validate_series(&bars).is_err());
    }

    #[test]
    fn non_positive_price_rejected() {
        let mut bad = bar_at(0, 100.0);
        bad.low = -1.0;
        assert!(validate_series(&[bad]).is_err());
    }

    #[test]
    fn zero_volume_rejected() {
        let mut bad = bar_at(0, 100.0);
        bad.volume = 0;
        assert!(validate_series(&[bad]).is_err());
    }

    #[test]
    fn inconsistent_envelope_rejected() {
        let mut bad = bar_at(0, 100.0);
        bad.high = bad.low - 1.0;
        assert!(!bad.is_sane());
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = bar_at(0, 100.0);
        let json = serde_json::to_string(&bar).unwrap();
        let back: PriceBar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, back);
    }
}

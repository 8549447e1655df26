//! Engine error taxonomy.
//!
//! Every failure mode of the evaluation pipeline maps to one of four kinds.
//! The engine never emits a partially-valid decision: any error aborts the
//! evaluation for that symbol and surfaces the specific kind to the caller.

use thiserror::Error;

/// Structured error types for the evaluation pipeline.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The price window is shorter than an indicator's required lookback.
    #[error("insufficient data for {indicator}: need {required} bars, got {actual}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        actual: usize,
    },

    /// Non-monotonic timestamps or non-positive price/volume in a bar series.
    #[error("invalid series: {0}")]
    InvalidSeries(String),

    /// A required provider call failed or returned nothing.
    ///
    /// Fatal for the primary source; a failing secondary source degrades to
    /// single-source mode instead of raising this.
    #[error("source '{source_name}' unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// A NaN or infinity escaped the documented divide-by-zero guards.
    ///
    /// This signals a logic defect and aborts rather than emitting a decision.
    #[error("non-finite value produced in {context}")]
    Computation { context: &'static str },
}

/// Check a computed value for NaN/infinity, converting to `Computation`.
pub(crate) fn ensure_finite(value: f64, context: &'static str) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::Computation { context })
    }
}

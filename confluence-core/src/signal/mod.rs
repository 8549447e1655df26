//! Single-source signal analysis.
//!
//! One indicator snapshot in, one directional signal out. The analyzer is a
//! `ScoringStrategy` implementation so alternative scorers can be swapped in
//! at engine construction.

pub mod analyzer;
pub mod factor;
pub mod scoring;

pub use analyzer::RuleBasedScoring;
pub use factor::{Direction, FactorKind, SignalFactor};
pub use scoring::{DirectionalSignal, ScoringStrategy};

//! Confluence Core — technical signal composition and risk engine.
//!
//! Converts price/volume series from one or two quote sources into a single
//! structured, advisory trade decision:
//! - Indicator library (RSI, MACD, SMA/EMA, Bollinger, stochastic,
//!   volatility, volume trend), recomputed fresh per evaluation
//! - Rule-based single-source signal analyzer behind a swappable
//!   `ScoringStrategy` seam
//! - Dual-source reconciliation (agreement score + price discrepancy)
//! - Bounded confidence folding with forced-HOLD on source disagreement
//! - Volatility-scaled entry/target/stop zones, position sizing, hold time
//! - Append-only decision history with rolling accuracy metrics
//!
//! Data flows one way: bars → indicators → signal → reconciliation →
//! confidence → risk zones → composed decision → tracker.

pub mod confidence;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod reconcile;
pub mod risk;
pub mod signal;
pub mod tracker;

pub use config::{ConfigError, EngineConfig};
pub use engine::Engine;
pub use error::EngineError;

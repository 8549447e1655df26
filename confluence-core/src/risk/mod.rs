//! Risk & zone calculation.
//!
//! Everything downstream of the confidence fold: entry/target/stop levels,
//! position size, hold time, and the profile/level parameterization.

pub mod hold_time;
pub mod profile;
pub mod sizing;
pub mod zones;

pub use hold_time::estimate_hold_time;
pub use profile::{RiskLevel, RiskParams, RiskProfile};
pub use sizing::position_size_pct;
pub use zones::{compute_zones, effective_volatility, TradeZones};

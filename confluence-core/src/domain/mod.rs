//! Domain types for Confluence.

pub mod bar;
pub mod decision;
pub mod ids;
pub mod quote;

pub use bar::{validate_series, PriceBar};
pub use decision::{Action, DecisionRecord, EntryZone, HoldBucket, HoldTime, Outcome, TradeDecision};
pub use ids::DecisionId;
pub use quote::{BollingerBands, IndicatorSet, MacdSet, SourceQuote, VolumeProfile, VolumeTrend};

/// Symbol type alias.
pub type Symbol = String;

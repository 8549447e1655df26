//! Entry zone, target, and stop-loss derivation.
//!
//! All distances scale with effective volatility (the trailing return stddev,
//! floored so quiet markets still get non-degenerate zones). BUY zones skew
//! below market to favor pullback entries; SELL zones skew above. HOLD pins
//! target and stop to the current price with a zero risk/reward ratio.

use serde::{Deserialize, Serialize};

use crate::domain::{Action, EntryZone};
use crate::error::{ensure_finite, EngineError};

use super::profile::RiskParams;

/// Price levels derived for one decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeZones {
    pub entry_zone: EntryZone,
    pub target: f64,
    pub stop_loss: f64,
    pub risk_reward_ratio: f64,
}

/// Volatility with the configured floor applied.
pub fn effective_volatility(volatility: f64, floor: f64) -> f64 {
    volatility.max(floor)
}

pub fn compute_zones(
    price: f64,
    action: Action,
    effective_volatility: f64,
    params: &RiskParams,
) -> Result<TradeZones, EngineError> {
    let ev = effective_volatility;
    let zones = match action {
        Action::Buy => {
            let target = price * (1.0 + params.target_multiplier * ev);
            let stop_loss = price * (1.0 - params.stop_multiplier * ev);
            TradeZones {
                entry_zone: EntryZone {
                    low: price * (1.0 - 0.5 * ev),
                    high: price * (1.0 + 0.2 * ev),
                },
                target,
                stop_loss,
                risk_reward_ratio: risk_reward(price, target, stop_loss)?,
            }
        }
        Action::Sell => {
            let target = price * (1.0 - params.target_multiplier * ev);
            let stop_loss = price * (1.0 + params.stop_multiplier * ev);
            TradeZones {
                entry_zone: EntryZone {
                    low: price * (1.0 - 0.2 * ev),
                    high: price * (1.0 + 0.5 * ev),
                },
                target,
                stop_loss,
                risk_reward_ratio: risk_reward(price, target, stop_loss)?,
            }
        }
        Action::Hold => TradeZones {
            entry_zone: EntryZone {
                low: price * 0.995,
                high: price * 1.005,
            },
            target: price,
            stop_loss: price,
            risk_reward_ratio: 0.0,
        },
    };

    ensure_finite(zones.entry_zone.low, "entry zone")?;
    ensure_finite(zones.entry_zone.high, "entry zone")?;
    ensure_finite(zones.target, "target")?;
    ensure_finite(zones.stop_loss, "stop loss")?;

    Ok(zones)
}

/// |target − entry| / |entry − stop|, with the entry at the current price.
fn risk_reward(entry: f64, target: f64, stop_loss: f64) -> Result<f64, EngineError> {
    let risk = (entry - stop_loss).abs();
    if risk == 0.0 {
        // Multipliers and the volatility floor are positive, so a zero risk
        // distance means corrupted inputs.
        return Err(EngineError::Computation {
            context: "risk/reward",
        });
    }
    ensure_finite((target - entry).abs() / risk, "risk/reward")
}

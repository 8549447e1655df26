//! Volatility — population standard deviation of trailing simple returns.
//!
//! Lookback: period + 1 closes (period returns).

use crate::domain::PriceBar;
use crate::error::EngineError;

use super::trailing_window;

pub fn volatility(bars: &[PriceBar], period: usize) -> Result<f64, EngineError> {
    let window = trailing_window(bars, period + 1, "volatility")?;

    let returns: Vec<f64> = window
        .windows(2)
        .map(|pair| pair[1].close / pair[0].close - 1.0)
        .collect();

    let mean = returns.iter().sum::<f64>() / period as f64;
    let variance = returns
        .iter()
        .map(|r| {
            let diff = r - mean;
            diff * diff
        })
        .sum::<f64>()
        / period as f64;

    Ok(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn constant_price_has_zero_volatility() {
        let bars = make_bars(&[100.0; 10]);
        assert_approx(volatility(&bars, 5).unwrap(), 0.0, 1e-12);
    }

    #[test]
    fn constant_growth_has_zero_volatility() {
        // Identical simple return each bar → zero dispersion.
        let closes: Vec<f64> = (0..10).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let bars = make_bars(&closes);
        assert_approx(volatility(&bars, 5).unwrap(), 0.0, 1e-9);
    }

    #[test]
    fn alternating_returns_known_value() {
        // Returns alternate +10% / ~-9.09%; dispersion well above zero.
        let bars = make_bars(&[100.0, 110.0, 100.0, 110.0, 100.0]);
        let value = volatility(&bars, 4).unwrap();
        assert!(value > 0.05, "got {value}");
    }

    #[test]
    fn volatility_is_non_negative() {
        let bars = make_bars(&[100.0, 103.0, 99.0, 104.0, 97.0, 105.0]);
        assert!(volatility(&bars, 5).unwrap() >= 0.0);
    }

    #[test]
    fn volatility_insufficient_data() {
        let bars = make_bars(&[100.0, 101.0, 102.0]);
        assert!(matches!(
            volatility(&bars, 20),
            Err(EngineError::InsufficientData { required: 21, .. })
        ));
    }
}

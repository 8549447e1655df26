//! Volume profile — current volume against its trailing average.
//!
//! Trend classification: increasing above 1.2× the average, decreasing below
//! 0.8×, stable between. Lookback: avg_period.

use crate::domain::{PriceBar, VolumeProfile, VolumeTrend};
use crate::error::EngineError;

use super::trailing_window;

pub fn volume_profile(bars: &[PriceBar], avg_period: usize) -> Result<VolumeProfile, EngineError> {
    let window = trailing_window(bars, avg_period, "volume")?;

    let current = window[window.len() - 1].volume as f64;
    let average = window.iter().map(|bar| bar.volume as f64).sum::<f64>() / avg_period as f64;

    // Series validation rejects zero-volume bars, so the average is positive.
    let ratio = current / average;
    let trend = if ratio > 1.2 {
        VolumeTrend::Increasing
    } else if ratio < 0.8 {
        VolumeTrend::Decreasing
    } else {
        VolumeTrend::Stable
    };

    Ok(VolumeProfile {
        current,
        average,
        trend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn with_volumes(volumes: &[u64]) -> Vec<PriceBar> {
        let closes: Vec<f64> = volumes.iter().map(|_| 100.0).collect();
        let mut bars = make_bars(&closes);
        for (bar, &volume) in bars.iter_mut().zip(volumes) {
            bar.volume = volume;
        }
        bars
    }

    #[test]
    fn flat_volume_is_stable() {
        let bars = with_volumes(&[1_000; 5]);
        let profile = volume_profile(&bars, 5).unwrap();
        assert_eq!(profile.trend, VolumeTrend::Stable);
        assert_eq!(profile.current, 1_000.0);
        assert_eq!(profile.average, 1_000.0);
    }

    #[test]
    fn surge_is_increasing() {
        let bars = with_volumes(&[1_000, 1_000, 1_000, 1_000, 3_000]);
        let profile = volume_profile(&bars, 5).unwrap();
        assert_eq!(profile.trend, VolumeTrend::Increasing);
    }

    #[test]
    fn collapse_is_decreasing() {
        let bars = with_volumes(&[1_000, 1_000, 1_000, 1_000, 200]);
        let profile = volume_profile(&bars, 5).unwrap();
        assert_eq!(profile.trend, VolumeTrend::Decreasing);
    }

    #[test]
    fn boundary_ratios_are_stable() {
        // current exactly 1.2x average → not increasing (strict inequality)
        let bars = with_volumes(&[950, 950, 950, 950, 1_200]);
        let profile = volume_profile(&bars, 5).unwrap();
        assert_eq!(profile.average, 1_000.0);
        assert_eq!(profile.trend, VolumeTrend::Stable);
    }

    #[test]
    fn volume_insufficient_data() {
        let bars = with_volumes(&[1_000, 1_000]);
        assert!(volume_profile(&bars, 5).is_err());
    }
}

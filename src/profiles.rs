//! Seeded synthetic hourly profiles.
//!
//! Used in place of historical CSV inputs, e.g. for quick runs and tests.
//! The same seed always yields the same series.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::Result;
use crate::forecast::{DemandSeries, SolarRatio};

/// Hours in a non-leap year.
pub const HOURS_PER_YEAR: usize = 8760;

const HOURS_PER_DAY: usize = 24;

/// Gaussian noise via the Box-Muller transform.
///
/// Returns 0 for a non-positive `std_dev` without drawing from `rng`.
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    z0 * std_dev
}

/// Position of `hour` within the year in `[0, 1)`, wrapping every 8760 hours.
fn year_pos(hour: usize) -> f64 {
    (hour % HOURS_PER_YEAR) as f64 / HOURS_PER_YEAR as f64
}

/// Hourly national demand shape.
///
/// `demand(h) = base + daily·sin(2π·h/24 + phase) + seasonal·cos(2π·h/8760) + noise`,
/// floored at zero. The seasonal term peaks in midwinter.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandProfile {
    /// Mean hourly demand (kW).
    pub base_kw: f64,
    /// Amplitude of the daily swing (kW).
    pub daily_amp_kw: f64,
    /// Phase of the daily swing in radians.
    pub phase_rad: f64,
    /// Amplitude of the seasonal swing (kW).
    pub seasonal_amp_kw: f64,
    /// Standard deviation of the hourly noise (kW).
    pub noise_std: f64,
}

impl Default for DemandProfile {
    fn default() -> Self {
        Self {
            base_kw: 7000.0,
            daily_amp_kw: 1500.0,
            phase_rad: -2.0,
            seasonal_amp_kw: 1000.0,
            noise_std: 150.0,
        }
    }
}

impl DemandProfile {
    /// Generates `hours` values of demand observed in `year`.
    pub fn generate(&self, year: i32, hours: usize, seed: u64) -> DemandSeries {
        let mut rng = StdRng::seed_from_u64(seed);
        let values = (0..hours)
            .map(|h| {
                let day_pos = (h % HOURS_PER_DAY) as f64 / HOURS_PER_DAY as f64;
                let daily = (2.0 * PI * day_pos + self.phase_rad).sin();
                let seasonal = (2.0 * PI * year_pos(h)).cos();
                let kw = self.base_kw
                    + self.daily_amp_kw * daily
                    + self.seasonal_amp_kw * seasonal
                    + gaussian_noise(&mut rng, self.noise_std);
                kw.max(0.0)
            })
            .collect();
        DemandSeries::new(year, values)
    }
}

/// Hourly solar availability shape.
///
/// A half-cosine bump between sunrise and sunset, centred on noon. Day length
/// swings by `seasonal_shift_hours` around `day_length_hours`, longest at
/// midsummer. A multiplicative noise term models cloud cover; the result is
/// clamped to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarProfile {
    /// Mean hours of daylight.
    pub day_length_hours: f64,
    /// Seasonal change of day length either side of the mean.
    pub seasonal_shift_hours: f64,
    /// Standard deviation of the multiplicative cloud noise.
    pub noise_std: f64,
}

impl Default for SolarProfile {
    fn default() -> Self {
        Self {
            day_length_hours: 12.0,
            seasonal_shift_hours: 2.0,
            noise_std: 0.1,
        }
    }
}

impl SolarProfile {
    /// Clear-sky fraction of peak output at `hour`.
    pub fn daylight_frac(&self, hour: usize) -> f64 {
        // the year starts in midwinter, so day length bottoms out at hour 0
        let season = (2.0 * PI * year_pos(hour)).cos();
        let length = (self.day_length_hours - self.seasonal_shift_hours * season)
            .clamp(0.0, HOURS_PER_DAY as f64);
        let sunrise = 12.0 - length / 2.0;
        let sunset = 12.0 + length / 2.0;

        // sample the middle of the hour
        let t = (hour % HOURS_PER_DAY) as f64 + 0.5;
        if t <= sunrise || t >= sunset {
            return 0.0;
        }
        let x = (t - sunrise) / (sunset - sunrise);
        (PI * (x - 0.5)).cos()
    }

    /// Generates `hours` solar ratios.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in shape; the ratio constructor still checks
    /// the `[0, 1]` bound.
    pub fn generate(&self, hours: usize, seed: u64) -> Result<SolarRatio> {
        let mut rng = StdRng::seed_from_u64(seed);
        let values = (0..hours)
            .map(|h| {
                let frac = self.daylight_frac(h);
                if frac <= 0.0 {
                    return 0.0;
                }
                let noise_mult = 1.0 + gaussian_noise(&mut rng, self.noise_std);
                (frac * noise_mult).clamp(0.0, 1.0)
            })
            .collect();
        SolarRatio::new(values)
    }
}

/// Full-year demand and solar ratio from the default shapes.
///
/// Demand and solar draw from independent streams derived from `seed`.
pub fn synthetic_year(year: i32, seed: u64) -> Result<(DemandSeries, SolarRatio)> {
    let demand = DemandProfile::default().generate(year, HOURS_PER_YEAR, seed);
    let solar = SolarProfile::default().generate(HOURS_PER_YEAR, seed.wrapping_add(1))?;
    Ok((demand, solar))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_std_noise_is_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(gaussian_noise(&mut rng, 0.0), 0.0);
        assert_eq!(gaussian_noise(&mut rng, -1.0), 0.0);
    }

    #[test]
    fn same_seed_same_series() {
        let a = DemandProfile::default().generate(2018, 200, 7);
        let b = DemandProfile::default().generate(2018, 200, 7);
        let c = DemandProfile::default().generate(2018, 200, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn demand_without_noise_follows_shape() {
        let profile = DemandProfile {
            noise_std: 0.0,
            phase_rad: 0.0,
            seasonal_amp_kw: 0.0,
            ..DemandProfile::default()
        };
        let series = profile.generate(2018, 24, 0);
        assert_eq!(series.year, 2018);
        assert!((series.values[0] - 7000.0).abs() < 1e-9);
        assert!((series.values[6] - 8500.0).abs() < 1e-9);
        assert!((series.values[18] - 5500.0).abs() < 1e-9);
    }

    #[test]
    fn demand_is_never_negative() {
        let profile = DemandProfile {
            base_kw: 0.0,
            ..DemandProfile::default()
        };
        let series = profile.generate(2018, 500, 3);
        assert!(series.values.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn solar_is_dark_at_night_and_peaks_at_noon() {
        let profile = SolarProfile {
            seasonal_shift_hours: 0.0,
            ..SolarProfile::default()
        };
        assert_eq!(profile.daylight_frac(0), 0.0);
        assert_eq!(profile.daylight_frac(3), 0.0);
        assert_eq!(profile.daylight_frac(22), 0.0);
        let noon = profile.daylight_frac(11);
        let morning = profile.daylight_frac(7);
        assert!(noon > morning && morning > 0.0);
        assert!(noon <= 1.0);
    }

    #[test]
    fn summer_days_are_longer() {
        let profile = SolarProfile::default();
        let lit = |day: usize| {
            (0..24)
                .filter(|h| profile.daylight_frac(day * 24 + h) > 0.0)
                .count()
        };
        assert!(lit(182) > lit(0));
    }

    #[test]
    fn full_year_ratios_are_bounded() {
        let (demand, solar) = synthetic_year(2018, 42).unwrap();
        assert_eq!(demand.len(), HOURS_PER_YEAR);
        assert_eq!(solar.len(), HOURS_PER_YEAR);
        assert!(solar.values().iter().all(|r| (0.0..=1.0).contains(r)));
        assert!(solar.values().iter().any(|r| *r > 0.5));
    }
}

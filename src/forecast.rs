//! Predictors that scale historical hourly inputs to a simulated year.

use crate::error::{Result, SimError};

/// Hourly national demand (kWh per hour) observed or predicted for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandSeries {
    /// Calendar year the values belong to.
    pub year: i32,
    /// One value per hour of the year.
    pub values: Vec<f64>,
}

impl DemandSeries {
    pub fn new(year: i32, values: Vec<f64>) -> Self {
        Self { year, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Hourly solar production normalised to `[0, 1]` of installed capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarRatio {
    values: Vec<f64>,
}

impl SolarRatio {
    /// Wraps hourly ratios, rejecting any value outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::RatioOutOfRange`] naming the first offending hour.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if let Some((hour, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(SimError::RatioOutOfRange { hour, value });
        }
        Ok(Self { values })
    }

    /// Min-max normalises a raw production profile into ratios.
    ///
    /// A flat profile normalises to all zeros.
    pub fn from_production(production: &[f64]) -> Result<Self> {
        let min = production.iter().copied().fold(f64::INFINITY, f64::min);
        let max = production.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;
        if production.is_empty() || span <= 0.0 || !span.is_finite() {
            return Self::new(vec![0.0; production.len()]);
        }
        Self::new(production.iter().map(|v| (v - min) / span).collect())
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Grows `series` to `target_year` by `growth_rate` compounded yearly.
///
/// # Errors
///
/// Returns [`SimError::PredictBeforeSeries`] if `target_year` precedes the series.
pub fn predict_demand(series: &DemandSeries, growth_rate: f64, target_year: i32) -> Result<DemandSeries> {
    if target_year < series.year {
        return Err(SimError::PredictBeforeSeries {
            series_year: series.year,
            target_year,
        });
    }
    let factor = growth_rate.powi(target_year - series.year);
    Ok(DemandSeries {
        year: target_year,
        values: series.values.iter().map(|v| v * factor).collect(),
    })
}

/// Hourly solar output (kWh per hour) of `capacity_kw` installed panels.
///
/// Panel degradation is not modelled.
pub fn predict_solar_production(ratio: &SolarRatio, capacity_kw: f64) -> Vec<f64> {
    ratio.values.iter().map(|r| r * capacity_kw).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn demand_grows_by_compounded_rate() {
        let base = DemandSeries::new(2018, vec![100.0, 200.0]);
        let grown = predict_demand(&base, 1.1, 2020).unwrap();
        assert_eq!(grown.year, 2020);
        assert!(approx_eq!(f64, grown.values[0], 121.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, grown.values[1], 242.0, epsilon = 1e-9));
    }

    #[test]
    fn same_year_is_identity() {
        let base = DemandSeries::new(2018, vec![3.5, 4.5]);
        assert_eq!(predict_demand(&base, 1.028, 2018).unwrap(), base);
    }

    #[test]
    fn predicting_backwards_fails() {
        let base = DemandSeries::new(2018, vec![1.0]);
        assert!(matches!(
            predict_demand(&base, 1.028, 2017),
            Err(SimError::PredictBeforeSeries {
                series_year: 2018,
                target_year: 2017
            })
        ));
    }

    #[test]
    fn prediction_composes() {
        let base = DemandSeries::new(2018, vec![10.0, 25.0, 7.5]);
        let via = predict_demand(&predict_demand(&base, 1.028, 2025).unwrap(), 1.028, 2040).unwrap();
        let direct = predict_demand(&base, 1.028, 2040).unwrap();
        assert_eq!(via.year, direct.year);
        for (a, b) in via.values.iter().zip(&direct.values) {
            assert!(approx_eq!(f64, *a, *b, epsilon = 1e-9));
        }
    }

    #[test]
    fn solar_scales_ratio_by_capacity() {
        let ratio = SolarRatio::new(vec![0.0, 0.5, 1.0]).unwrap();
        assert_eq!(predict_solar_production(&ratio, 4000.0), vec![0.0, 2000.0, 4000.0]);
    }

    #[test]
    fn ratio_outside_unit_interval_is_rejected() {
        assert!(matches!(
            SolarRatio::new(vec![0.2, 1.2]),
            Err(SimError::RatioOutOfRange { hour: 1, .. })
        ));
        assert!(SolarRatio::new(vec![-0.1]).is_err());
    }

    #[test]
    fn production_is_min_max_normalised() {
        let ratio = SolarRatio::from_production(&[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(ratio.values(), &[0.0, 0.5, 1.0]);
        let flat = SolarRatio::from_production(&[5.0, 5.0]).unwrap();
        assert_eq!(flat.values(), &[0.0, 0.0]);
    }
}

//! Year-indexed parameters built from interpolation ranges.

use serde::Deserialize;

use crate::error::{Result, SimError};

/// The law used to produce a value inside one year range.
///
/// Deserialised from a TOML inline table tagged by `type`, e.g.
/// `{ type = "linear", start_value = 62.0, end_value = 55.0 }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum Interpolation {
    /// Same value for every year in the range.
    Constant { value: f64 },
    /// Straight line from `start_value` at the first year to `end_value` at the last.
    Linear { start_value: f64, end_value: f64 },
    /// `start_value` compounded yearly at `rate` from the first year.
    Compound { start_value: f64, rate: f64 },
}

impl Interpolation {
    /// Evaluates the law for `target_year` inside `[start_year, end_year]`.
    ///
    /// Linear values are clamped to the end points outside the range.
    pub fn at(&self, start_year: i32, end_year: i32, target_year: i32) -> f64 {
        match *self {
            Interpolation::Constant { value } => value,
            Interpolation::Linear {
                start_value,
                end_value,
            } => {
                if end_year <= start_year || target_year <= start_year {
                    return start_value;
                }
                if target_year >= end_year {
                    return end_value;
                }
                let frac = f64::from(target_year - start_year) / f64::from(end_year - start_year);
                start_value + (end_value - start_value) * frac
            }
            Interpolation::Compound { start_value, rate } => {
                start_value * (1.0 + rate).powi(target_year - start_year)
            }
        }
    }
}

/// One interpolation law valid over an inclusive year range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterpoRange {
    pub start_year: i32,
    pub end_year: i32,
    pub interpolation: Interpolation,
}

impl InterpoRange {
    pub fn new(start_year: i32, end_year: i32, interpolation: Interpolation) -> Self {
        Self {
            start_year,
            end_year,
            interpolation,
        }
    }

    pub fn constant(start_year: i32, end_year: i32, value: f64) -> Self {
        Self::new(start_year, end_year, Interpolation::Constant { value })
    }

    pub fn linear(start_year: i32, end_year: i32, start_value: f64, end_value: f64) -> Self {
        Self::new(
            start_year,
            end_year,
            Interpolation::Linear {
                start_value,
                end_value,
            },
        )
    }

    pub fn at(&self, year: i32) -> f64 {
        self.interpolation.at(self.start_year, self.end_year, year)
    }
}

/// A model parameter that yields one value per calendar year.
///
/// Ranges are kept sorted by `start_year`. A year is served by the last range
/// starting at or before it, so where two ranges share a boundary year the
/// later range wins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Vec<InterpoRange>")]
pub struct InterpolatedParam {
    ranges: Vec<InterpoRange>,
}

impl From<Vec<InterpoRange>> for InterpolatedParam {
    fn from(mut ranges: Vec<InterpoRange>) -> Self {
        ranges.sort_by_key(|r| r.start_year);
        Self { ranges }
    }
}

impl InterpolatedParam {
    pub fn new(ranges: Vec<InterpoRange>) -> Self {
        ranges.into()
    }

    /// A single constant range covering `[start_year, end_year]`.
    pub fn constant(start_year: i32, end_year: i32, value: f64) -> Self {
        Self::new(vec![InterpoRange::constant(start_year, end_year, value)])
    }

    pub fn ranges(&self) -> &[InterpoRange] {
        &self.ranges
    }

    /// Returns the range serving `year`, if any.
    pub fn range_for(&self, year: i32) -> Option<&InterpoRange> {
        self.ranges
            .iter()
            .rev()
            .find(|r| r.start_year <= year)
            .filter(|r| year <= r.end_year)
    }

    /// Value of the parameter in `year`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::YearOutOfRange`] when no range covers `year`.
    pub fn at(&self, year: i32) -> Result<f64> {
        self.range_for(year)
            .map(|r| r.at(year))
            .ok_or_else(|| SimError::YearOutOfRange {
                param: self.describe(),
                year,
            })
    }

    /// First and last year covered by any range.
    pub fn span(&self) -> Option<(i32, i32)> {
        let first = self.ranges.first()?.start_year;
        let last = self.ranges.iter().map(|r| r.end_year).max()?;
        Some((first, last))
    }

    fn describe(&self) -> String {
        match self.span() {
            Some((first, last)) => format!("{first}-{last}"),
            None => "empty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn constant_is_flat() {
        let p = InterpolatedParam::constant(2020, 2050, 25.0);
        assert_eq!(p.at(2020).unwrap(), 25.0);
        assert_eq!(p.at(2050).unwrap(), 25.0);
    }

    #[test]
    fn linear_hits_both_end_points() {
        let r = InterpoRange::linear(2020, 2025, 3912.0, 3274.0);
        assert_eq!(r.at(2020), 3912.0);
        assert_eq!(r.at(2025), 3274.0);
        assert!(approx_eq!(f64, r.at(2022), 3912.0 - 2.0 * 127.6, epsilon = 1e-9));
    }

    #[test]
    fn linear_with_zero_width_range_returns_start() {
        let r = InterpoRange::linear(2030, 2030, 1.0, 2.0);
        assert_eq!(r.at(2030), 1.0);
    }

    #[test]
    fn compound_grows_from_start_year() {
        let p = InterpolatedParam::new(vec![InterpoRange::new(
            2020,
            2030,
            Interpolation::Compound {
                start_value: 10.0,
                rate: 0.5,
            },
        )]);
        assert_eq!(p.at(2020).unwrap(), 10.0);
        assert_eq!(p.at(2021).unwrap(), 15.0);
        assert_eq!(p.at(2022).unwrap(), 22.5);
    }

    #[test]
    fn later_range_wins_on_shared_boundary() {
        let p = InterpolatedParam::new(vec![
            InterpoRange::linear(2025, 2030, 55.0, 46.0),
            InterpoRange::linear(2020, 2025, 62.0, 50.0),
        ]);
        assert_eq!(p.at(2025).unwrap(), 55.0);
        assert!(approx_eq!(f64, p.at(2024).unwrap(), 52.4, epsilon = 1e-9));
    }

    #[test]
    fn single_year_ranges_cover_their_year() {
        let p = InterpolatedParam::new(vec![
            InterpoRange::constant(2020, 2020, 2440.0),
            InterpoRange::constant(2021, 2021, 2380.0),
            InterpoRange::constant(2022, 2039, 1440.0),
        ]);
        assert_eq!(p.at(2020).unwrap(), 2440.0);
        assert_eq!(p.at(2021).unwrap(), 2380.0);
        assert_eq!(p.at(2039).unwrap(), 1440.0);
    }

    #[test]
    fn years_outside_every_range_are_rejected() {
        let p = InterpolatedParam::new(vec![
            InterpoRange::constant(2020, 2022, 1.0),
            InterpoRange::constant(2025, 2030, 2.0),
        ]);
        assert!(matches!(
            p.at(2019),
            Err(SimError::YearOutOfRange { year: 2019, .. })
        ));
        assert!(p.at(2023).is_err());
        assert!(p.at(2031).is_err());
        assert_eq!(p.span(), Some((2020, 2030)));
    }

    #[test]
    fn deserialises_from_tagged_tables() {
        #[derive(Deserialize)]
        struct Wrapper {
            lifetime: InterpolatedParam,
        }
        let toml = r#"
[[lifetime]]
start_year = 2030
end_year = 2050
interpolation = { type = "constant", value = 20.0 }

[[lifetime]]
start_year = 2020
end_year = 2029
interpolation = { type = "constant", value = 15.0 }
"#;
        let w: Wrapper = toml::from_str(toml).unwrap();
        assert_eq!(w.lifetime.ranges()[0].start_year, 2020);
        assert_eq!(w.lifetime.at(2029).unwrap(), 15.0);
        assert_eq!(w.lifetime.at(2030).unwrap(), 20.0);
    }
}

//! Build-out roadmaps and the scenarios enumerated from them.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, SimError};

/// Slack allowed when comparing a step against a range width, so that
/// decimal inputs like `0.9 -> 0.95` with step `0.05` are accepted.
const STEP_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRoadmapParam {
    start: f64,
    end_min: f64,
    end_max: f64,
    step: f64,
}

/// Range of end-of-horizon values explored for one build-out parameter.
///
/// The value starts at `start` in the first year and ends anywhere in
/// `[end_min, end_max)`, sampled every `step`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawRoadmapParam")]
pub struct RoadmapParam {
    start: f64,
    end_min: f64,
    end_max: f64,
    step: f64,
}

impl TryFrom<RawRoadmapParam> for RoadmapParam {
    type Error = SimError;

    fn try_from(raw: RawRoadmapParam) -> Result<Self> {
        Self::new(raw.start, raw.end_min, raw.end_max, raw.step)
    }
}

impl RoadmapParam {
    /// Creates a validated roadmap parameter.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRoadmap`] if any value is negative or not
    /// finite, if `start <= end_min <= end_max` does not hold, if `step`
    /// exceeds a non-zero `end_min - start`, or if `step` is zero while the
    /// end range is non-empty.
    pub fn new(start: f64, end_min: f64, end_max: f64, step: f64) -> Result<Self> {
        for (name, value) in [
            ("start", start),
            ("end_min", end_min),
            ("end_max", end_max),
            ("step", step),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(name, "must be a finite non-negative number"));
            }
        }
        if end_min < start {
            return Err(invalid("end_min", "must be greater or equal to start"));
        }
        if end_max < end_min {
            return Err(invalid("end_max", "must be greater or equal to end_min"));
        }
        let lead = end_min - start;
        if lead > 0.0 && step > lead + STEP_TOLERANCE {
            return Err(invalid("step", "must be smaller or equal to end_min - start"));
        }
        if step == 0.0 && end_max > end_min {
            return Err(invalid("step", "must be > 0 when end_max > end_min"));
        }
        Ok(Self {
            start,
            end_min,
            end_max,
            step,
        })
    }

    /// Builds a parameter from literals already known to satisfy [`Self::new`].
    ///
    /// Only for built-in defaults; presets are re-validated in tests.
    pub(crate) const fn from_literals(start: f64, end_min: f64, end_max: f64, step: f64) -> Self {
        Self {
            start,
            end_min,
            end_max,
            step,
        }
    }

    /// A parameter that stays at `value` for the whole horizon.
    pub fn fixed(value: f64) -> Result<Self> {
        Self::new(value, value, value + 1.0, 1.0)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end_min(&self) -> f64 {
        self.end_min
    }

    pub fn end_max(&self) -> f64 {
        self.end_max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Candidate end values: the half-open sequence `end_min, end_min + step, ...` below `end_max`.
    pub fn end_values(&self) -> Vec<f64> {
        candidate_end_values(self.end_min, self.end_max, self.step)
    }
}

fn invalid(field: &str, message: &str) -> SimError {
    SimError::InvalidRoadmap {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Arithmetic sequence over `[from, to)` stepped by `step`.
///
/// The count is `ceil((to - from) / step)`, so a `to` that is not an exact
/// multiple away still yields its last partial step.
pub fn candidate_end_values(from: f64, to: f64, step: f64) -> Vec<f64> {
    if to <= from || step <= 0.0 {
        return Vec::new();
    }
    let count = ((to - from) / step).ceil() as usize;
    (0..count).map(|i| from + i as f64 * step).collect()
}

/// `count` evenly spaced points from `start` to `end`, both included.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let span = (count - 1) as f64;
            let mut values: Vec<f64> = (0..count)
                .map(|i| start + (end - start) * i as f64 / span)
                .collect();
            values[count - 1] = end;
            values
        }
    }
}

/// Value ranges for the five build-out parameters over a year horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct Roadmap {
    start_year: i32,
    end_year: i32,
    pub solar_capacity_kw: RoadmapParam,
    pub wind_capacity_kw: RoadmapParam,
    pub storage_capacity_kwh: RoadmapParam,
    pub storage_efficiency: RoadmapParam,
    /// Fraction of storage capacity held back from dispatch.
    pub storage_discharge: RoadmapParam,
}

impl Roadmap {
    /// Creates a roadmap; `params` are in the order solar, wind, storage
    /// capacity, storage efficiency, storage discharge.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRoadmap`] if `end_year < start_year`.
    pub fn new(start_year: i32, end_year: i32, params: [RoadmapParam; 5]) -> Result<Self> {
        if end_year < start_year {
            return Err(invalid("end_year", "must be greater or equal to start_year"));
        }
        let [solar, wind, capacity, efficiency, discharge] = params;
        Ok(Self {
            start_year,
            end_year,
            solar_capacity_kw: solar,
            wind_capacity_kw: wind,
            storage_capacity_kwh: capacity,
            storage_efficiency: efficiency,
            storage_discharge: discharge,
        })
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    /// Number of simulated years, `end_year - start_year`.
    pub fn horizon(&self) -> usize {
        (self.end_year - self.start_year) as usize
    }

    fn params(&self) -> [RoadmapParam; 5] {
        [
            self.solar_capacity_kw,
            self.wind_capacity_kw,
            self.storage_capacity_kwh,
            self.storage_efficiency,
            self.storage_discharge,
        ]
    }

    fn scenario_for(&self, ends: [f64; 5]) -> Scenario {
        let n = self.horizon();
        let [solar, wind, capacity, efficiency, discharge] = self.params();
        Scenario {
            start_year: self.start_year,
            solar_capacity_kw: linspace(solar.start, ends[0], n),
            wind_capacity_kw: linspace(wind.start, ends[1], n),
            storage_capacity_kwh: linspace(capacity.start, ends[2], n),
            storage_efficiency: linspace(efficiency.start, ends[3], n),
            storage_discharge: linspace(discharge.start, ends[4], n),
        }
    }

    /// Enumerates the distinct scenarios spanned by this roadmap.
    ///
    /// Takes the cartesian product of every parameter's candidate end
    /// values and linearly interpolates each from its start. Scenarios whose
    /// [`ScenarioSignature`] was already produced are skipped, so the first
    /// combination wins. The iterator is lazy; callers running large sweeps
    /// can stop or report progress between items.
    pub fn scenarios(&self) -> impl Iterator<Item = Scenario> + '_ {
        let candidates = self.params().map(|p| p.end_values());
        let total: usize = candidates.iter().map(Vec::len).product();
        if total == 0 {
            warn!("roadmap has a parameter with an empty end range, no scenarios to enumerate");
        } else {
            debug!(combinations = total, "enumerating roadmap scenarios");
        }

        let mut seen = HashSet::new();
        Combinations::new(candidates)
            .map(move |ends| self.scenario_for(ends))
            .filter(move |s| seen.insert(s.signature()))
    }

    /// The business-as-usual scenario: every parameter held at its start value.
    pub fn business_as_usual(&self) -> Scenario {
        self.scenario_for(self.params().map(|p| p.start))
    }
}

/// Odometer over the cartesian product of five candidate lists, last list fastest.
struct Combinations {
    lists: [Vec<f64>; 5],
    idx: [usize; 5],
    done: bool,
}

impl Combinations {
    fn new(lists: [Vec<f64>; 5]) -> Self {
        let done = lists.iter().any(Vec::is_empty);
        Self {
            lists,
            idx: [0; 5],
            done,
        }
    }
}

impl Iterator for Combinations {
    type Item = [f64; 5];

    fn next(&mut self) -> Option<[f64; 5]> {
        if self.done {
            return None;
        }
        let item = std::array::from_fn(|k| self.lists[k][self.idx[k]]);

        // Advance, carrying leftwards
        let mut k = self.lists.len();
        loop {
            if k == 0 {
                self.done = true;
                break;
            }
            k -= 1;
            self.idx[k] += 1;
            if self.idx[k] < self.lists[k].len() {
                break;
            }
            self.idx[k] = 0;
        }
        Some(item)
    }
}

/// Rounded end-of-horizon values used to tell scenarios apart.
///
/// Values are rounded to the nearest integer, so fractional parameters that
/// differ only below 0.5 (e.g. efficiencies of 0.9 and 0.95) collapse into
/// one signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScenarioSignature([Option<i64>; 5]);

impl fmt::Display for ScenarioSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|v| v.map_or_else(|| "na".to_string(), |v| v.to_string()))
            .collect();
        f.write_str(&parts.join("_"))
    }
}

/// One concrete multi-year trajectory of the five build-out parameters.
///
/// All sequences have one entry per simulated year, starting at `start_year`.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    start_year: i32,
    solar_capacity_kw: Vec<f64>,
    wind_capacity_kw: Vec<f64>,
    storage_capacity_kwh: Vec<f64>,
    storage_efficiency: Vec<f64>,
    storage_discharge: Vec<f64>,
}

/// One year's slice of a [`Scenario`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyScenario {
    pub solar_capacity_kw: f64,
    pub wind_capacity_kw: f64,
    pub storage_capacity_kwh: f64,
    pub storage_efficiency: f64,
    /// Fraction of storage capacity held back from dispatch.
    pub storage_discharge: f64,
}

impl Scenario {
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn len(&self) -> usize {
        self.solar_capacity_kw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solar_capacity_kw.is_empty()
    }

    pub fn solar_capacity_kw(&self) -> &[f64] {
        &self.solar_capacity_kw
    }

    pub fn wind_capacity_kw(&self) -> &[f64] {
        &self.wind_capacity_kw
    }

    pub fn storage_capacity_kwh(&self) -> &[f64] {
        &self.storage_capacity_kwh
    }

    pub fn signature(&self) -> ScenarioSignature {
        let last = |v: &[f64]| v.last().map(|x| x.round() as i64);
        ScenarioSignature([
            last(&self.solar_capacity_kw),
            last(&self.wind_capacity_kw),
            last(&self.storage_capacity_kwh),
            last(&self.storage_efficiency),
            last(&self.storage_discharge),
        ])
    }

    /// The slice at position `i`, if in range.
    pub fn get(&self, i: usize) -> Option<YearlyScenario> {
        Some(YearlyScenario {
            solar_capacity_kw: *self.solar_capacity_kw.get(i)?,
            wind_capacity_kw: *self.wind_capacity_kw.get(i)?,
            storage_capacity_kwh: *self.storage_capacity_kwh.get(i)?,
            storage_efficiency: *self.storage_efficiency.get(i)?,
            storage_discharge: *self.storage_discharge.get(i)?,
        })
    }

    /// Yearly slices in year order.
    pub fn iter(&self) -> impl Iterator<Item = YearlyScenario> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    /// `(year, slice)` pairs starting at the scenario's first year.
    pub fn years(&self) -> impl Iterator<Item = (i32, YearlyScenario)> + '_ {
        (self.start_year..).zip(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn param(start: f64, end_min: f64, end_max: f64, step: f64) -> RoadmapParam {
        RoadmapParam::new(start, end_min, end_max, step).unwrap()
    }

    fn single(p: RoadmapParam) -> Roadmap {
        let fixed = RoadmapParam::fixed(0.0).unwrap();
        Roadmap::new(2020, 2030, [p, fixed, fixed, fixed, fixed]).unwrap()
    }

    #[test]
    fn half_open_candidate_end_values() {
        assert_eq!(param(0.0, 0.0, 10.0, 5.0).end_values(), vec![0.0, 5.0]);
        assert_eq!(candidate_end_values(0.0, 11.0, 5.0), vec![0.0, 5.0, 10.0]);
        assert!(candidate_end_values(3.0, 3.0, 1.0).is_empty());
    }

    #[test]
    fn single_parameter_example_yields_two_scenarios() {
        let roadmap = single(param(0.0, 0.0, 10.0, 5.0));
        let scenarios: Vec<_> = roadmap.scenarios().collect();
        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].solar_capacity_kw().last(), Some(&0.0));
        assert_eq!(scenarios[1].solar_capacity_kw().last(), Some(&5.0));
    }

    #[rstest]
    #[case(-1.0, 0.0, 1.0, 0.5, "start")]
    #[case(5.0, 4.0, 6.0, 0.5, "end_min")]
    #[case(0.0, 4.0, 3.0, 0.5, "end_max")]
    #[case(0.0, 4.0, 8.0, 5.0, "step")]
    #[case(0.0, 0.0, 8.0, 0.0, "step")]
    #[case(0.0, f64::NAN, 8.0, 1.0, "end_min")]
    fn invalid_params_are_rejected(
        #[case] start: f64,
        #[case] end_min: f64,
        #[case] end_max: f64,
        #[case] step: f64,
        #[case] field: &str,
    ) {
        match RoadmapParam::new(start, end_min, end_max, step) {
            Err(SimError::InvalidRoadmap { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected invalid {field}, got {other:?}"),
        }
    }

    #[test]
    fn decimal_steps_tolerate_float_error() {
        assert!(RoadmapParam::new(0.9, 0.95, 0.95, 0.05).is_ok());
    }

    #[test]
    fn end_year_before_start_year_is_rejected() {
        let p = RoadmapParam::fixed(1.0).unwrap();
        assert!(Roadmap::new(2030, 2020, [p; 5]).is_err());
    }

    #[test]
    fn scenarios_interpolate_from_start_to_end() {
        let roadmap = Roadmap::new(
            2020,
            2025,
            [
                param(0.0, 100.0, 101.0, 1.0),
                RoadmapParam::fixed(80.0).unwrap(),
                RoadmapParam::fixed(0.0).unwrap(),
                RoadmapParam::fixed(0.9).unwrap(),
                RoadmapParam::fixed(0.1).unwrap(),
            ],
        )
        .unwrap();
        let scenario = roadmap.scenarios().next().unwrap();
        assert_eq!(scenario.len(), 5);
        assert_eq!(scenario.solar_capacity_kw(), &[0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(scenario.wind_capacity_kw(), &[80.0; 5]);

        let years: Vec<i32> = scenario.years().map(|(y, _)| y).collect();
        assert_eq!(years, vec![2020, 2021, 2022, 2023, 2024]);
    }

    #[test]
    fn product_order_varies_last_parameter_fastest() {
        let roadmap = Roadmap::new(
            2020,
            2022,
            [
                param(0.0, 10.0, 30.0, 10.0),
                RoadmapParam::fixed(0.0).unwrap(),
                RoadmapParam::fixed(0.0).unwrap(),
                RoadmapParam::fixed(0.0).unwrap(),
                param(0.0, 1.0, 3.0, 1.0),
            ],
        )
        .unwrap();
        let ends: Vec<(f64, f64)> = roadmap
            .scenarios()
            .map(|s| {
                let last = s.get(s.len() - 1).unwrap();
                (last.solar_capacity_kw, last.storage_discharge)
            })
            .collect();
        assert_eq!(ends, vec![(10.0, 1.0), (10.0, 2.0), (20.0, 1.0), (20.0, 2.0)]);
    }

    #[test]
    fn rounded_signature_collapses_close_scenarios() {
        // 0.9 and 0.95 both round to 1, first seen wins
        let roadmap = Roadmap::new(
            2020,
            2030,
            [
                RoadmapParam::fixed(10.0).unwrap(),
                RoadmapParam::fixed(10.0).unwrap(),
                RoadmapParam::fixed(10.0).unwrap(),
                param(0.85, 0.9, 0.96, 0.05),
                RoadmapParam::fixed(0.1).unwrap(),
            ],
        )
        .unwrap();
        let scenarios: Vec<_> = roadmap.scenarios().collect();
        assert_eq!(scenarios.len(), 1);
        let last = scenarios[0].get(9).unwrap();
        assert_eq!(last.storage_efficiency, 0.9);
    }

    #[test]
    fn empty_end_range_yields_no_scenarios() {
        let roadmap = single(param(1.0, 2.0, 2.0, 0.0));
        assert_eq!(roadmap.scenarios().count(), 0);
    }

    #[test]
    fn business_as_usual_holds_start_values() {
        let roadmap = single(param(4.0, 50.0, 150.0, 20.0));
        let bau = roadmap.business_as_usual();
        assert_eq!(bau.len(), 10);
        assert!(bau.iter().all(|y| y.solar_capacity_kw == 4.0));
    }

    #[test]
    fn deserialises_and_validates() {
        #[derive(Deserialize)]
        struct Wrapper {
            solar: RoadmapParam,
        }
        let ok: Wrapper =
            toml::from_str("solar = { start = 4000.0, end_min = 50000.0, end_max = 150000.0, step = 20000.0 }")
                .unwrap();
        assert_eq!(ok.solar.end_values().len(), 5);

        let bad = toml::from_str::<Wrapper>("solar = { start = 80.0, end_min = 50.0, end_max = 300.0, step = 10.0 }");
        assert!(bad.is_err());
    }
}

//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use roadmap_sim::forecast::{DemandSeries, SolarRatio};
use roadmap_sim::runner::HourlyInputs;
use roadmap_sim::sim::dispatch::StorageSpec;
use roadmap_sim::sim::types::FixedProduction;
use roadmap_sim::sources::EnergySource;

/// One day of demand for the 48-hour regression scenario.
pub const GOLDEN_DEMAND_DAY: [f64; 24] = [
    1.0, 2.0, 2.5, 3.0, 4.0, 5.0, 7.0, 9.0, 11.0, 12.0, 12.0, 11.0, 9.0, 9.0, 9.0, 7.0, 6.0, 5.0,
    4.0, 3.0, 2.0, 2.0, 2.0, 1.0,
];

/// One day of solar generation for the 48-hour regression scenario.
pub const GOLDEN_SOLAR_DAY: [f64; 24] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 5.0, 9.0, 17.0, 19.0, 15.0, 10.0, 7.0, 5.0, 2.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
];

/// Expected gas draw for each hour of one day.
pub const GOLDEN_GAS_DAY: [f64; 24] = [
    1.0, 2.0, 2.5, 3.0, 4.0, 3.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.75, 2.75, 6.75, 6.0, 6.0, 5.0,
    4.0, 3.0, 2.0, 2.0, 2.0, 1.0,
];

/// Expected battery state at the end of each hour of one day.
pub const GOLDEN_BATTERY_DAY: [f64; 24] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.25, 2.5, 3.75, 2.75, 1.5, 0.25, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
];

/// Repeats a one-day profile over two days.
pub fn two_days(day: &[f64; 24]) -> Vec<f64> {
    day.iter().chain(day.iter()).copied().collect()
}

/// Storage of the regression scenario (5 kWh, 87% efficiency, 25% per hour).
pub fn golden_storage() -> StorageSpec {
    StorageSpec {
        capacity_kwh: 5.0,
        efficiency: 0.87,
        charge_rate: 0.25,
    }
}

/// Solar-only fixed production of the regression scenario.
pub fn golden_fixed() -> FixedProduction {
    FixedProduction::new(48)
        .with(EnergySource::Solar, two_days(&GOLDEN_SOLAR_DAY))
        .unwrap()
}

/// Small hourly inputs for runner-level tests: four hours, demand in the
/// thousands so coal must-run never exceeds it.
pub fn small_inputs() -> HourlyInputs {
    HourlyInputs::new(
        DemandSeries::new(2020, vec![3000.0, 3500.0, 4000.0, 2500.0]),
        SolarRatio::new(vec![0.0, 0.6, 1.0, 0.1]).unwrap(),
    )
    .unwrap()
}

//! Integration tests for roadmap enumeration and scenario evaluation.

mod common;

use std::collections::HashSet;

use float_cmp::approx_eq;
use roadmap_sim::config::ModelConfig;
use roadmap_sim::params::{AllParams, Roadmap, RoadmapParam};
use roadmap_sim::runner::{evaluate_roadmap, evaluate_roadmap_with, evaluate_scenario};
use rstest::rstest;

fn fixed(v: f64) -> RoadmapParam {
    RoadmapParam::fixed(v).unwrap()
}

fn solar_sweep(param: RoadmapParam, start_year: i32, end_year: i32) -> Roadmap {
    Roadmap::new(
        start_year,
        end_year,
        [param, fixed(0.0), fixed(0.0), fixed(0.9), fixed(0.0)],
    )
    .unwrap()
}

#[test]
fn half_open_range_yields_two_scenarios() {
    let roadmap = solar_sweep(RoadmapParam::new(0.0, 0.0, 10.0, 5.0).unwrap(), 2020, 2025);
    let scenarios: Vec<_> = roadmap.scenarios().collect();
    assert_eq!(scenarios.len(), 2);

    assert!(scenarios[0].solar_capacity_kw().iter().all(|v| *v == 0.0));
    let ramp = scenarios[1].solar_capacity_kw();
    assert_eq!(ramp.len(), 5);
    assert_eq!(ramp[0], 0.0);
    assert_eq!(ramp[4], 5.0);
    assert!(ramp.windows(2).all(|w| w[0] <= w[1]));
}

#[rstest]
#[case::single_step(1000.0, 2000.0, 3000.0, 1000.0, 1)]
#[case::three_steps(1000.0, 2000.0, 5000.0, 1000.0, 3)]
#[case::partial_last_step(1000.0, 2000.0, 4500.0, 1000.0, 3)]
fn scenario_count_follows_candidates(
    #[case] start: f64,
    #[case] end_min: f64,
    #[case] end_max: f64,
    #[case] step: f64,
    #[case] expected: usize,
) {
    let param = RoadmapParam::new(start, end_min, end_max, step).unwrap();
    let roadmap = solar_sweep(param, 2020, 2030);
    assert_eq!(roadmap.scenarios().count(), expected);
}

#[test]
fn baseline_preset_signatures_are_unique() {
    let roadmap = ModelConfig::baseline().roadmap().unwrap();
    let mut seen = HashSet::new();
    for scenario in roadmap.scenarios().take(200) {
        assert_eq!(scenario.len(), 30);
        assert!(seen.insert(scenario.signature()), "{}", scenario.signature());
    }
}

#[test]
fn sweep_matches_single_evaluations() {
    let roadmap = solar_sweep(
        RoadmapParam::new(1000.0, 2000.0, 4000.0, 1000.0).unwrap(),
        2020,
        2024,
    );
    let inputs = common::small_inputs();
    let params = AllParams::default();

    let sweep = evaluate_roadmap(&roadmap, &inputs, &params, None).unwrap();
    assert_eq!(sweep.len(), 2);

    for (scenario, swept) in roadmap.scenarios().zip(&sweep) {
        let (single, tables) = evaluate_scenario(&scenario, &inputs, &params).unwrap();
        assert_eq!(tables.len(), 4);
        assert_eq!(single.signature, swept.signature);
        assert!(approx_eq!(
            f64,
            single.kpis.final_npv_total,
            swept.kpis.final_npv_total,
            epsilon = 1e-9
        ));
    }
}

#[test]
fn more_solar_burns_less_gas() {
    let roadmap = solar_sweep(
        RoadmapParam::new(1000.0, 2000.0, 4000.0, 1000.0).unwrap(),
        2020,
        2024,
    );
    let sweep = evaluate_roadmap(&roadmap, &common::small_inputs(), &AllParams::default(), None)
        .unwrap();
    let (low, high) = (&sweep[0].kpis, &sweep[1].kpis);
    assert!(high.total_gas_kwh < low.total_gas_kwh);
    assert!(high.renewable_pct > low.renewable_pct);
}

#[test]
fn sink_sees_every_year_of_every_scenario() {
    let roadmap = solar_sweep(
        RoadmapParam::new(1000.0, 2000.0, 4000.0, 1000.0).unwrap(),
        2020,
        2023,
    );
    let seen = std::sync::Mutex::new(Vec::new());
    evaluate_roadmap_with(
        &roadmap,
        &common::small_inputs(),
        &AllParams::default(),
        None,
        |evaluation, tables| {
            let years: Vec<i32> = tables.iter().map(|t| t.year).collect();
            seen.lock().unwrap().push((evaluation.signature, years));
            Ok(())
        },
    )
    .unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|(_, years)| years == &vec![2020, 2021, 2022]));
}

#[test]
fn demand_before_series_year_is_rejected() {
    let roadmap = solar_sweep(fixed(1000.0), 2019, 2021);
    let result = evaluate_scenario(
        &roadmap.business_as_usual(),
        &common::small_inputs(),
        &AllParams::default(),
    );
    assert!(result.is_err());
}

//! Scenario evaluation: yearly dispatch, production summaries and costs.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{Result, SimError};
use crate::forecast::{DemandSeries, SolarRatio, predict_demand, predict_solar_production};
use crate::params::{AllParams, Roadmap, Scenario, ScenarioSignature, YearlyScenario};
use crate::sim::costs::{CostReport, calculate_costs};
use crate::sim::dispatch::{StorageSpec, simulate_year};
use crate::sim::kpi::{ScenarioKpis, YearlySimulationProductionResults};
use crate::sim::types::{DispatchTable, FixedProduction};
use crate::sources::EnergySource;

/// Historical hourly inputs shared by every simulated year.
#[derive(Debug, Clone)]
pub struct HourlyInputs {
    pub demand: DemandSeries,
    pub solar: SolarRatio,
}

impl HourlyInputs {
    /// # Errors
    ///
    /// Returns [`SimError::LengthMismatch`] if the series differ in length.
    pub fn new(demand: DemandSeries, solar: SolarRatio) -> Result<Self> {
        if demand.len() != solar.len() {
            return Err(SimError::LengthMismatch {
                what: "solar ratio".to_string(),
                expected: demand.len(),
                actual: solar.len(),
            });
        }
        Ok(Self { demand, solar })
    }
}

fn storage_for(yearly: &YearlyScenario, charge_rate: f64) -> Result<StorageSpec> {
    if !(yearly.storage_efficiency > 0.0 && yearly.storage_efficiency <= 1.0) {
        return Err(SimError::InvalidParameter {
            param: "storage_efficiency".to_string(),
            message: format!("must be in (0, 1], got {}", yearly.storage_efficiency),
        });
    }
    if !(0.0..=1.0).contains(&yearly.storage_discharge) {
        return Err(SimError::InvalidParameter {
            param: "storage_discharge".to_string(),
            message: format!("must be in [0, 1], got {}", yearly.storage_discharge),
        });
    }
    Ok(StorageSpec {
        capacity_kwh: yearly.storage_capacity_kwh * (1.0 - yearly.storage_discharge),
        efficiency: yearly.storage_efficiency,
        charge_rate,
    })
}

/// Simulates one year of one scenario.
///
/// Demand is grown to `year`, solar is scaled to the year's capacity, coal
/// runs flat at its must-run level and storage keeps its reserve fraction
/// out of dispatch.
pub fn run_scenario_year(
    year: i32,
    yearly: &YearlyScenario,
    inputs: &HourlyInputs,
    params: &AllParams,
) -> Result<DispatchTable> {
    let general = &params.general;
    let demand = predict_demand(&inputs.demand, general.demand_growth_rate, year)?;
    let solar = predict_solar_production(&inputs.solar, yearly.solar_capacity_kw);
    let hours = solar.len();
    let coal = vec![general.coal_must_run.at(year)?; hours];

    let fixed = FixedProduction::new(hours)
        .with(EnergySource::Solar, solar)?
        .with(EnergySource::Coal, coal)?;

    simulate_year(
        year,
        &demand.values,
        &fixed,
        storage_for(yearly, general.charge_rate)?,
    )
}

/// Simulates every year of `scenario`, in parallel across years.
///
/// Tables are returned in year order.
pub fn run_scenario(
    scenario: &Scenario,
    inputs: &HourlyInputs,
    params: &AllParams,
) -> Result<Vec<DispatchTable>> {
    let years: Vec<(i32, YearlyScenario)> = scenario.years().collect();
    years
        .par_iter()
        .map(|(year, yearly)| run_scenario_year(*year, yearly, inputs, params))
        .collect()
}

/// Everything derived from one scenario except its hourly tables.
#[derive(Debug, Clone)]
pub struct ScenarioEvaluation {
    pub signature: ScenarioSignature,
    pub scenario: Scenario,
    pub production: Vec<YearlySimulationProductionResults>,
    pub costs: CostReport,
    pub kpis: ScenarioKpis,
}

/// Summarises already simulated years of `scenario` and prices them.
pub fn evaluate_dispatch(
    scenario: &Scenario,
    tables: &[DispatchTable],
    params: &AllParams,
) -> Result<ScenarioEvaluation> {
    let production = tables
        .iter()
        .zip(scenario.iter())
        .map(|(table, yearly)| -> Result<YearlySimulationProductionResults> {
            let coal = params.general.coal_must_run.at(table.year)?;
            Ok(YearlySimulationProductionResults::from_dispatch(
                table, &yearly, coal,
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    let costs = calculate_costs(&production, scenario.start_year(), params)?;
    let kpis = ScenarioKpis::from_results(tables, &costs);

    Ok(ScenarioEvaluation {
        signature: scenario.signature(),
        scenario: scenario.clone(),
        production,
        costs,
        kpis,
    })
}

/// Runs and prices one scenario, returning its hourly tables alongside.
pub fn evaluate_scenario(
    scenario: &Scenario,
    inputs: &HourlyInputs,
    params: &AllParams,
) -> Result<(ScenarioEvaluation, Vec<DispatchTable>)> {
    let tables = run_scenario(scenario, inputs, params)?;
    let evaluation = evaluate_dispatch(scenario, &tables, params)?;
    debug!(
        scenario = %evaluation.signature,
        npv = evaluation.kpis.final_npv_total,
        "scenario evaluated"
    );
    Ok((evaluation, tables))
}

/// Evaluates up to `limit` scenarios of `roadmap` in parallel.
///
/// Hourly tables are dropped once summarised; use
/// [`evaluate_roadmap_with`] to inspect them.
pub fn evaluate_roadmap(
    roadmap: &Roadmap,
    inputs: &HourlyInputs,
    params: &AllParams,
    limit: Option<usize>,
) -> Result<Vec<ScenarioEvaluation>> {
    evaluate_roadmap_with(roadmap, inputs, params, limit, |_, _| Ok(()))
}

/// Like [`evaluate_roadmap`], handing each scenario's tables to `sink`
/// before they are dropped. `sink` may run on several threads at once.
///
/// Results keep enumeration order.
pub fn evaluate_roadmap_with<F>(
    roadmap: &Roadmap,
    inputs: &HourlyInputs,
    params: &AllParams,
    limit: Option<usize>,
    sink: F,
) -> Result<Vec<ScenarioEvaluation>>
where
    F: Fn(&ScenarioEvaluation, &[DispatchTable]) -> Result<()> + Sync,
{
    let scenarios: Vec<Scenario> = roadmap
        .scenarios()
        .take(limit.unwrap_or(usize::MAX))
        .collect();
    info!(
        scenarios = scenarios.len(),
        years = roadmap.horizon(),
        "evaluating roadmap"
    );

    let evaluations = scenarios
        .par_iter()
        .map(|scenario| -> Result<ScenarioEvaluation> {
            let (evaluation, tables) = evaluate_scenario(scenario, inputs, params)?;
            sink(&evaluation, &tables)?;
            Ok(evaluation)
        })
        .collect::<Result<Vec<_>>>()?;

    info!(evaluated = evaluations.len(), "roadmap evaluation complete");
    Ok(evaluations)
}

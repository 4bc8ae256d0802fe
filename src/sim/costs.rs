//! Yearly capex, opex and externality costs with running NPV per source.

use std::collections::BTreeMap;

use crate::error::{Result, SimError};
use crate::params::AllParams;
use crate::sim::kpi::YearlySimulationProductionResults;
use crate::sources::{EmissionType, EnergySource};

/// Costs of one energy source in one year.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YearlyCost {
    pub capex: f64,
    pub opex: f64,
    pub variable_opex: f64,
}

impl YearlyCost {
    pub fn total(&self) -> f64 {
        self.capex + self.opex + self.variable_opex
    }
}

/// All costs booked in one simulated year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearCosts {
    pub year: i32,
    pub by_source: BTreeMap<EnergySource, YearlyCost>,
    /// Monetised pollutant emissions, not attributed to a source.
    pub externalities: f64,
}

impl YearCosts {
    fn zero(year: i32) -> Self {
        Self {
            year,
            by_source: EnergySource::ALL
                .into_iter()
                .map(|s| (s, YearlyCost::default()))
                .collect(),
            externalities: 0.0,
        }
    }

    pub fn get(&self, source: EnergySource) -> YearlyCost {
        self.by_source.get(&source).copied().unwrap_or_default()
    }

    /// Sum of every source's total, excluding externalities.
    pub fn total(&self) -> f64 {
        self.by_source.values().map(YearlyCost::total).sum()
    }
}

/// Cost engine output: per-year costs and the running NPV per source.
#[derive(Debug, Clone, PartialEq)]
pub struct CostReport {
    pub years: Vec<YearCosts>,
    pub npvs: Vec<BTreeMap<EnergySource, f64>>,
}

impl CostReport {
    /// NPV of `source` after the last simulated year.
    pub fn final_npv(&self, source: EnergySource) -> f64 {
        self.npvs
            .last()
            .and_then(|n| n.get(&source))
            .copied()
            .unwrap_or(0.0)
    }

    /// NPV summed over all sources after the last simulated year.
    pub fn final_npv_total(&self) -> f64 {
        EnergySource::ALL.into_iter().map(|s| self.final_npv(s)).sum()
    }

    pub fn total_externalities(&self) -> f64 {
        self.years.iter().map(|y| y.externalities).sum()
    }
}

/// Periodic payment that amortises `present_value` over `periods` at `rate`.
///
/// Sign follows the usual finance convention: a positive present value gives
/// a negative payment.
pub fn pmt(rate: f64, periods: f64, present_value: f64) -> f64 {
    if rate == 0.0 {
        return -present_value / periods;
    }
    let growth = (1.0 + rate).powf(periods);
    -present_value * rate * growth / (growth - 1.0)
}

/// Net present value of `cash_flows`, the first discounted zero periods.
pub fn npv(rate: f64, cash_flows: &[f64]) -> f64 {
    cash_flows
        .iter()
        .zip(0..)
        .map(|(v, t)| v / (1.0 + rate).powi(t))
        .sum()
}

/// Adds `cash_flow` discounted `periods` periods to `last_npv`.
pub fn running_npv(rate: f64, last_npv: f64, cash_flow: f64, periods: i32) -> f64 {
    last_npv + cash_flow / (1.0 + rate).powi(periods)
}

/// Computes yearly costs and running NPVs from production snapshots.
///
/// `snapshots[i]` describes year `start_year + i`. The first year books no
/// cost; every later year pays an annuity on its capacity change, opex on its
/// whole fleet and externalities on its polluting generation.
///
/// # Errors
///
/// Fails if a curve does not cover a simulated year or a lifetime is not positive.
pub fn calculate_costs(
    snapshots: &[YearlySimulationProductionResults],
    start_year: i32,
    params: &AllParams,
) -> Result<CostReport> {
    let general = &params.general;
    let mut years = vec![YearCosts::zero(start_year)];
    let mut npvs = vec![
        EnergySource::ALL
            .into_iter()
            .map(|s| (s, 0.0))
            .collect::<BTreeMap<_, _>>(),
    ];

    for i in 1..snapshots.len() {
        let year = start_year + i as i32;
        let (prev, curr) = (&snapshots[i - 1], &snapshots[i]);
        let mut year_costs = YearCosts::zero(year);
        let mut year_npvs = BTreeMap::new();

        for source in EnergySource::ALL {
            let curves = params.costs.get(source);
            let lifetime = curves.lifetime.at(year)?;
            if lifetime <= 0.0 {
                return Err(SimError::InvalidParameter {
                    param: format!("costs.{source}.lifetime"),
                    message: format!("must be > 0 in {year}, got {lifetime}"),
                });
            }

            let new_capacity = curr.get(source) - prev.get(source);
            let cost = YearlyCost {
                capex: -pmt(general.wacc_rate, lifetime, new_capacity),
                opex: curves.opex.at(year)? * curr.get(source),
                // TODO: charge variable opex per kWh generated once fuel prices are modelled
                variable_opex: 0.0,
            };
            year_costs.by_source.insert(source, cost);

            let last = npvs[i - 1].get(&source).copied().unwrap_or(0.0);
            year_npvs.insert(
                source,
                running_npv(general.interest_rate, last, cost.total(), i as i32),
            );
        }

        // Every polluting source is charged on the combined emitting generation.
        for source in EnergySource::POLLUTING {
            for pollutant in EmissionType::ALL {
                year_costs.externalities += params.emissions.coefficient(source, pollutant)
                    * params.emission_prices.get(pollutant).at(year)?
                    * curr.emitting_used();
            }
        }

        years.push(year_costs);
        npvs.push(year_npvs);
    }

    Ok(CostReport { years, npvs })
}

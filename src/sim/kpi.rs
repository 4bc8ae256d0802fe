//! Post-hoc summaries of dispatch and cost results.

use std::fmt;

use super::costs::CostReport;
use super::types::{DispatchRow, DispatchTable};
use crate::params::YearlyScenario;
use crate::sources::EnergySource;

/// Installed capacities and polluting generation of one simulated year.
///
/// This is the cost engine's per-year input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YearlySimulationProductionResults {
    pub installed_gas_kw: f64,
    pub installed_solar_kw: f64,
    pub installed_wind_kw: f64,
    pub installed_coal_kw: f64,
    pub installed_storage_kwh: f64,
    pub used_gas_kwh: f64,
    pub used_coal_kwh: f64,
}

impl YearlySimulationProductionResults {
    /// Summarises one year of dispatch.
    ///
    /// Gas capacity is the peak hourly gas draw, since gas fills whatever
    /// fixed generation and storage leave uncovered.
    pub fn from_dispatch(
        table: &DispatchTable,
        scenario: &YearlyScenario,
        coal_must_run_kw: f64,
    ) -> Self {
        Self {
            installed_gas_kw: table.peak(|r| r.gas),
            installed_solar_kw: scenario.solar_capacity_kw,
            installed_wind_kw: scenario.wind_capacity_kw,
            installed_coal_kw: coal_must_run_kw,
            installed_storage_kwh: scenario.storage_capacity_kwh,
            used_gas_kwh: table.total(|r| r.gas),
            used_coal_kwh: table.total(|r| r.coal),
        }
    }

    /// Generation from all polluting sources.
    pub fn emitting_used(&self) -> f64 {
        self.used_gas_kwh + self.used_coal_kwh
    }

    /// Installed capacity of `source`.
    pub fn get(&self, source: EnergySource) -> f64 {
        match source {
            EnergySource::Gas => self.installed_gas_kw,
            EnergySource::Coal => self.installed_coal_kw,
            EnergySource::Solar => self.installed_solar_kw,
            EnergySource::Storage => self.installed_storage_kwh,
            EnergySource::Wind => self.installed_wind_kw,
        }
    }
}

/// Headline indicators of one evaluated scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioKpis {
    /// Share of demand served by solar and wind, in percent.
    pub renewable_pct: f64,
    pub total_demand_kwh: f64,
    pub total_gas_kwh: f64,
    pub total_storage_kwh: f64,
    pub total_curtailed_kwh: f64,
    pub final_npv_total: f64,
    pub total_externalities: f64,
}

impl ScenarioKpis {
    pub fn from_results(tables: &[DispatchTable], costs: &CostReport) -> Self {
        let sum = |f: fn(&DispatchRow) -> f64| -> f64 {
            tables.iter().map(|t| t.total(f)).sum()
        };
        let demand = sum(|r| r.demand);
        let renewable = sum(|r| r.solar + r.wind);
        let renewable_pct = if demand > 0.0 {
            100.0 * renewable / demand
        } else {
            0.0
        };

        Self {
            renewable_pct,
            total_demand_kwh: demand,
            total_gas_kwh: sum(|r| r.gas),
            total_storage_kwh: sum(|r| r.storage),
            total_curtailed_kwh: sum(|r| r.curtailed_energy),
            final_npv_total: costs.final_npv_total(),
            total_externalities: costs.total_externalities(),
        }
    }
}

impl fmt::Display for ScenarioKpis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Scenario KPIs ---")?;
        writeln!(f, "Renewable share:     {:.2}%", self.renewable_pct)?;
        writeln!(f, "Demand:              {:.0} kWh", self.total_demand_kwh)?;
        writeln!(f, "Gas burned:          {:.0} kWh", self.total_gas_kwh)?;
        writeln!(f, "Storage discharged:  {:.0} kWh", self.total_storage_kwh)?;
        writeln!(f, "Curtailed:           {:.0} kWh", self.total_curtailed_kwh)?;
        writeln!(f, "NPV (all sources):   {:.2}", self.final_npv_total)?;
        write!(f, "Externalities:       {:.2}", self.total_externalities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<DispatchRow>) -> DispatchTable {
        DispatchTable { year: 2030, rows }
    }

    fn yearly() -> YearlyScenario {
        YearlyScenario {
            solar_capacity_kw: 4000.0,
            wind_capacity_kw: 80.0,
            storage_capacity_kwh: 500.0,
            storage_efficiency: 0.85,
            storage_discharge: 0.8,
        }
    }

    fn empty_costs() -> CostReport {
        CostReport {
            years: Vec::new(),
            npvs: Vec::new(),
        }
    }

    #[test]
    fn production_summary_uses_peak_gas_and_nominal_storage() {
        let t = table(vec![
            DispatchRow {
                gas: 3.0,
                coal: 2.0,
                ..DispatchRow::default()
            },
            DispatchRow {
                gas: 7.0,
                coal: 1.5,
                ..DispatchRow::default()
            },
        ]);
        let s = YearlySimulationProductionResults::from_dispatch(&t, &yearly(), 1440.0);
        assert_eq!(s.installed_gas_kw, 7.0);
        assert_eq!(s.used_gas_kwh, 10.0);
        assert_eq!(s.used_coal_kwh, 3.5);
        assert_eq!(s.emitting_used(), 13.5);
        assert_eq!(s.get(EnergySource::Storage), 500.0);
        assert_eq!(s.get(EnergySource::Coal), 1440.0);
    }

    #[test]
    fn renewable_share() {
        let t = table(vec![
            DispatchRow {
                demand: 10.0,
                solar: 4.0,
                gas: 6.0,
                ..DispatchRow::default()
            },
            DispatchRow {
                demand: 10.0,
                wind: 1.0,
                gas: 9.0,
                ..DispatchRow::default()
            },
        ]);
        let kpis = ScenarioKpis::from_results(&[t], &empty_costs());
        assert_eq!(kpis.renewable_pct, 25.0);
        assert_eq!(kpis.total_gas_kwh, 15.0);
        assert!(kpis.to_string().contains("Renewable share:     25.00%"));
    }

    #[test]
    fn no_demand_gives_zero_share() {
        let kpis = ScenarioKpis::from_results(&[], &empty_costs());
        assert_eq!(kpis.renewable_pct, 0.0);
        assert_eq!(kpis.final_npv_total, 0.0);
    }
}

//! Model parameters: general settings, cost curves and emissions.
//!
//! Every section deserialises from TOML with defaults taken from
//! [`defaults`], so a configuration file only needs to name what it changes.

pub mod defaults;
pub mod interpolation;
pub mod roadmap;

use serde::Deserialize;

use crate::error::{Result, SimError};
use crate::sources::{EmissionType, EnergySource};

pub use interpolation::{InterpoRange, Interpolation, InterpolatedParam};
pub use roadmap::{Roadmap, RoadmapParam, Scenario, ScenarioSignature, YearlyScenario};

/// Global model settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralParams {
    /// First simulated year.
    pub start_year: i32,
    /// Exclusive end of the simulated horizon.
    pub end_year: i32,
    /// Yearly demand growth factor (1.028 = +2.8% per year).
    pub demand_growth_rate: f64,
    /// Fraction of storage capacity that can move in or out per hour.
    pub charge_rate: f64,
    /// Discount rate for NPV.
    pub interest_rate: f64,
    /// Weighted average cost of capital used to amortise capex.
    pub wacc_rate: f64,
    /// Coal generation that runs every hour (kW).
    pub coal_must_run: InterpolatedParam,
}

impl Default for GeneralParams {
    fn default() -> Self {
        Self {
            start_year: defaults::START_YEAR,
            end_year: defaults::END_YEAR,
            demand_growth_rate: 1.028,
            charge_rate: 0.25,
            interest_rate: 0.03,
            wacc_rate: 0.06,
            coal_must_run: defaults::coal_must_run(),
        }
    }
}

/// Cost curves for one energy source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceCostParams {
    /// Capital cost per installed unit.
    pub capex: InterpolatedParam,
    /// Fixed maintenance cost per installed unit per year.
    pub opex: InterpolatedParam,
    /// Economic lifetime in years.
    pub lifetime: InterpolatedParam,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostParams {
    pub solar: SourceCostParams,
    pub wind: SourceCostParams,
    pub storage: SourceCostParams,
    pub gas: SourceCostParams,
    pub coal: SourceCostParams,
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            solar: SourceCostParams {
                capex: defaults::solar_capex(),
                opex: defaults::solar_opex(),
                lifetime: defaults::solar_lifetime(),
            },
            wind: SourceCostParams {
                capex: defaults::wind_capex(),
                opex: defaults::wind_opex(),
                lifetime: defaults::wind_lifetime(),
            },
            storage: SourceCostParams {
                capex: defaults::storage_capex(),
                opex: defaults::storage_opex(),
                lifetime: defaults::storage_lifetime(),
            },
            gas: SourceCostParams {
                capex: defaults::gas_capex(),
                opex: defaults::gas_opex(),
                lifetime: defaults::gas_lifetime(),
            },
            coal: SourceCostParams {
                capex: defaults::coal_capex(),
                opex: defaults::coal_opex(),
                lifetime: defaults::coal_lifetime(),
            },
        }
    }
}

impl CostParams {
    pub fn get(&self, source: EnergySource) -> &SourceCostParams {
        match source {
            EnergySource::Solar => &self.solar,
            EnergySource::Wind => &self.wind,
            EnergySource::Storage => &self.storage,
            EnergySource::Gas => &self.gas,
            EnergySource::Coal => &self.coal,
        }
    }
}

/// Emitted amount of each pollutant per kWh generated. Missing entries are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollutantCoefficients {
    #[serde(rename = "CO2")]
    pub co2: f64,
    #[serde(rename = "SOx")]
    pub sox: f64,
    #[serde(rename = "NOx")]
    pub nox: f64,
    #[serde(rename = "PMx")]
    pub pmx: f64,
}

impl PollutantCoefficients {
    pub fn get(&self, pollutant: EmissionType) -> f64 {
        match pollutant {
            EmissionType::CO2 => self.co2,
            EmissionType::SOx => self.sox,
            EmissionType::NOx => self.nox,
            EmissionType::PMx => self.pmx,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmissionParams {
    pub gas: PollutantCoefficients,
    pub coal: PollutantCoefficients,
}

impl Default for EmissionParams {
    fn default() -> Self {
        Self {
            gas: PollutantCoefficients {
                co2: 397.0,
                sox: 0.0,
                nox: 0.16,
                pmx: 0.02,
            },
            coal: PollutantCoefficients::default(),
        }
    }
}

impl EmissionParams {
    /// Coefficient of `pollutant` for `source`; zero for non-polluting sources.
    pub fn coefficient(&self, source: EnergySource, pollutant: EmissionType) -> f64 {
        match source {
            EnergySource::Gas => self.gas.get(pollutant),
            EnergySource::Coal => self.coal.get(pollutant),
            _ => 0.0,
        }
    }
}

/// Price per unit of each pollutant emitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmissionPrices {
    #[serde(rename = "CO2")]
    pub co2: InterpolatedParam,
    #[serde(rename = "SOx")]
    pub sox: InterpolatedParam,
    #[serde(rename = "NOx")]
    pub nox: InterpolatedParam,
    #[serde(rename = "PMx")]
    pub pmx: InterpolatedParam,
}

impl Default for EmissionPrices {
    fn default() -> Self {
        Self {
            co2: defaults::co2_price(),
            sox: defaults::sox_price(),
            nox: defaults::nox_price(),
            pmx: defaults::pmx_price(),
        }
    }
}

impl EmissionPrices {
    pub fn get(&self, pollutant: EmissionType) -> &InterpolatedParam {
        match pollutant {
            EmissionType::CO2 => &self.co2,
            EmissionType::SOx => &self.sox,
            EmissionType::NOx => &self.nox,
            EmissionType::PMx => &self.pmx,
        }
    }
}

/// Every parameter the runner and the cost engine read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllParams {
    pub general: GeneralParams,
    pub costs: CostParams,
    pub emissions: EmissionParams,
    pub emission_prices: EmissionPrices,
}

impl AllParams {
    /// Every interpolated parameter, labelled with its dotted config path.
    pub fn interpolated(&self) -> Vec<(String, &InterpolatedParam)> {
        let mut out = vec![(
            "general.coal_must_run".to_string(),
            &self.general.coal_must_run,
        )];
        for source in EnergySource::ALL {
            let c = self.costs.get(source);
            out.push((format!("costs.{source}.capex"), &c.capex));
            out.push((format!("costs.{source}.opex"), &c.opex));
            out.push((format!("costs.{source}.lifetime"), &c.lifetime));
        }
        for pollutant in EmissionType::ALL {
            out.push((
                format!("emission_prices.{pollutant}"),
                self.emission_prices.get(pollutant),
            ));
        }
        out
    }

    /// Checks that every interpolated parameter covers `[start_year, end_year)`.
    ///
    /// # Errors
    ///
    /// Returns the first [`SimError::YearOutOfRange`] found, naming the
    /// parameter's config path.
    pub fn check_coverage(&self) -> Result<()> {
        for (name, param) in self.interpolated() {
            for year in self.general.start_year..self.general.end_year {
                param.at(year).map_err(|_| SimError::YearOutOfRange {
                    param: name.clone(),
                    year,
                })?;
            }
        }
        Ok(())
    }
}

//! TOML-based model configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SimError};
use crate::params::{
    AllParams, CostParams, EmissionParams, EmissionPrices, GeneralParams, Roadmap, RoadmapParam,
};

/// Top-level model configuration parsed from TOML.
///
/// All sections have defaults matching the baseline preset. Load from
/// TOML with [`ModelConfig::from_toml_file`] or use
/// [`ModelConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Horizon, growth, rates and coal must-run.
    pub general: GeneralParams,
    /// Capex / opex / lifetime curves per source.
    pub costs: CostParams,
    /// Pollutant coefficients of gas and coal.
    pub emissions: EmissionParams,
    /// Price per pollutant unit.
    pub emission_prices: EmissionPrices,
    /// Build-out ranges swept by the scenario enumerator.
    pub roadmap: RoadmapConfig,
    /// Hourly input data.
    pub data: DataConfig,
}

/// Build-out ranges for the five roadmap parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoadmapConfig {
    /// Installed solar (kW).
    pub solar_capacity: RoadmapParam,
    /// Installed wind (kW).
    pub wind_capacity: RoadmapParam,
    /// Nominal storage capacity (kWh).
    pub storage_capacity: RoadmapParam,
    /// Round-trip storage efficiency, in `(0, 1]`.
    pub storage_efficiency: RoadmapParam,
    /// Fraction of storage held back from dispatch, in `[0, 1]`.
    pub storage_discharge: RoadmapParam,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            solar_capacity: RoadmapParam::from_literals(4_000.0, 50_000.0, 150_000.0, 20_000.0),
            wind_capacity: RoadmapParam::from_literals(80.0, 250.0, 3_000.0, 100.0),
            storage_capacity: RoadmapParam::from_literals(0.0, 50_000.0, 400_000.0, 50_000.0),
            storage_efficiency: RoadmapParam::from_literals(0.85, 0.9, 0.95, 0.05),
            storage_discharge: RoadmapParam::from_literals(0.8, 0.9, 0.95, 0.05),
        }
    }
}

impl RoadmapConfig {
    fn named(&self) -> [(&'static str, &RoadmapParam); 5] {
        [
            ("roadmap.solar_capacity", &self.solar_capacity),
            ("roadmap.wind_capacity", &self.wind_capacity),
            ("roadmap.storage_capacity", &self.storage_capacity),
            ("roadmap.storage_efficiency", &self.storage_efficiency),
            ("roadmap.storage_discharge", &self.storage_discharge),
        ]
    }
}

/// Where hourly demand and solar series come from.
///
/// With no CSV paths the model runs on seeded synthetic profiles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// CSV file with a `demand` column.
    pub demand_csv: Option<PathBuf>,
    /// CSV file with a `solar_production` column.
    pub solar_csv: Option<PathBuf>,
    /// Calendar year the demand series was observed in.
    pub demand_year: i32,
    /// Seed for synthetic profiles.
    pub seed: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            demand_csv: None,
            solar_csv: None,
            demand_year: 2018,
            seed: 42,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"general.end_year"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ModelConfig {
    /// Returns the baseline model: default cost curves and build-out ranges.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the solar-push preset: a much larger solar build-out with
    /// little wind or storage.
    pub fn solar_push() -> Self {
        Self {
            roadmap: RoadmapConfig {
                solar_capacity: RoadmapParam::from_literals(4_000.0, 150_000.0, 300_000.0, 50_000.0),
                wind_capacity: RoadmapParam::from_literals(80.0, 80.0, 81.0, 1.0),
                storage_capacity: RoadmapParam::from_literals(0.0, 50_000.0, 150_000.0, 50_000.0),
                ..RoadmapConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the storage-push preset: moderate solar, large and efficient storage.
    pub fn storage_push() -> Self {
        Self {
            roadmap: RoadmapConfig {
                solar_capacity: RoadmapParam::from_literals(4_000.0, 50_000.0, 100_000.0, 25_000.0),
                wind_capacity: RoadmapParam::from_literals(80.0, 80.0, 81.0, 1.0),
                storage_capacity: RoadmapParam::from_literals(
                    0.0, 200_000.0, 800_000.0, 100_000.0,
                ),
                storage_efficiency: RoadmapParam::from_literals(0.85, 0.9, 1.0, 0.05),
                storage_discharge: RoadmapParam::from_literals(0.8, 0.85, 0.95, 0.05),
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "solar_push", "storage_push"];

    /// Loads a model from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> std::result::Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "solar_push" => Ok(Self::solar_push()),
            "storage_push" => Ok(Self::storage_push()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a model from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a model from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid, contains unknown
    /// fields or holds an invalid roadmap range.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// The parameter set read by the runner and cost engine.
    pub fn params(&self) -> AllParams {
        AllParams {
            general: self.general.clone(),
            costs: self.costs.clone(),
            emissions: self.emissions.clone(),
            emission_prices: self.emission_prices.clone(),
        }
    }

    /// The roadmap over `[general.start_year, general.end_year)`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRoadmap`] if the years are out of order.
    pub fn roadmap(&self) -> Result<Roadmap> {
        let r = &self.roadmap;
        Roadmap::new(
            self.general.start_year,
            self.general.end_year,
            [
                r.solar_capacity,
                r.wind_capacity,
                r.storage_capacity,
                r.storage_efficiency,
                r.storage_discharge,
            ],
        )
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let g = &self.general;

        if g.start_year >= g.end_year {
            errors.push(ConfigError {
                field: "general.start_year".into(),
                message: "must be < general.end_year".into(),
            });
        }
        if g.demand_growth_rate <= 0.0 {
            errors.push(ConfigError {
                field: "general.demand_growth_rate".into(),
                message: "must be > 0".into(),
            });
        }
        if !(0.0..=1.0).contains(&g.charge_rate) {
            errors.push(ConfigError {
                field: "general.charge_rate".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }
        if g.interest_rate <= -1.0 {
            errors.push(ConfigError {
                field: "general.interest_rate".into(),
                message: "must be > -1".into(),
            });
        }
        if g.start_year < g.end_year {
            if let Err(SimError::YearOutOfRange { param, year }) = self.params().check_coverage() {
                errors.push(ConfigError {
                    field: param,
                    message: format!("does not cover year {year}"),
                });
            }
        }

        for (field, param) in self.roadmap.named() {
            if let Err(e) = RoadmapParam::new(param.start(), param.end_min(), param.end_max(), param.step()) {
                errors.push(ConfigError {
                    field: field.into(),
                    message: e.to_string(),
                });
            }
        }
        let eff = &self.roadmap.storage_efficiency;
        if eff.start() <= 0.0 || eff.start() > 1.0 || eff.end_values().iter().any(|v| *v > 1.0) {
            errors.push(ConfigError {
                field: "roadmap.storage_efficiency".into(),
                message: "every value must be in (0.0, 1.0]".into(),
            });
        }
        let dis = &self.roadmap.storage_discharge;
        if dis.start() > 1.0 || dis.end_values().iter().any(|v| *v > 1.0) {
            errors.push(ConfigError {
                field: "roadmap.storage_discharge".into(),
                message: "every value must be in [0.0, 1.0]".into(),
            });
        }

        let d = &self.data;
        if d.demand_csv.is_some() != d.solar_csv.is_some() {
            errors.push(ConfigError {
                field: "data.demand_csv".into(),
                message: "must be set together with data.solar_csv".into(),
            });
        }
        if d.demand_year > g.start_year {
            errors.push(ConfigError {
                field: "data.demand_year".into(),
                message: "must be <= general.start_year".into(),
            });
        }

        errors
    }
}

//! Energy sources and pollutants tracked by the model.

use std::fmt;

use serde::Deserialize;

/// A generation or storage technology on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergySource {
    Solar,
    Wind,
    Gas,
    Coal,
    Storage,
}

impl EnergySource {
    /// Every source, in reporting order.
    pub const ALL: [EnergySource; 5] = [
        EnergySource::Solar,
        EnergySource::Wind,
        EnergySource::Gas,
        EnergySource::Coal,
        EnergySource::Storage,
    ];

    /// Sources whose generation emits pollutants.
    pub const POLLUTING: [EnergySource; 2] = [EnergySource::Gas, EnergySource::Coal];

    /// Dispatchable sources used to fill the gap left by fixed generation.
    pub const VARIABLE: [EnergySource; 2] = [EnergySource::Gas, EnergySource::Storage];

    /// Non-dispatchable sources whose hourly output is decided outside dispatch.
    pub const FIXED: [EnergySource; 3] =
        [EnergySource::Solar, EnergySource::Wind, EnergySource::Coal];

    /// Lowercase column name used in tables and config files.
    pub fn as_str(self) -> &'static str {
        match self {
            EnergySource::Solar => "solar",
            EnergySource::Wind => "wind",
            EnergySource::Gas => "gas",
            EnergySource::Coal => "coal",
            EnergySource::Storage => "storage",
        }
    }

    pub fn is_fixed(self) -> bool {
        Self::FIXED.contains(&self)
    }

    pub fn is_renewable(self) -> bool {
        matches!(self, EnergySource::Solar | EnergySource::Wind)
    }
}

impl fmt::Display for EnergySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pollutant priced as an externality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum EmissionType {
    CO2,
    SOx,
    NOx,
    PMx,
}

impl EmissionType {
    pub const ALL: [EmissionType; 4] = [
        EmissionType::CO2,
        EmissionType::SOx,
        EmissionType::NOx,
        EmissionType::PMx,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmissionType::CO2 => "CO2",
            EmissionType::SOx => "SOx",
            EmissionType::NOx => "NOx",
            EmissionType::PMx => "PMx",
        }
    }
}

impl fmt::Display for EmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_and_variable_sources_are_disjoint() {
        for source in EnergySource::VARIABLE {
            assert!(!source.is_fixed(), "{source} should not be fixed");
        }
        assert!(EnergySource::Coal.is_fixed());
    }

    #[test]
    fn only_solar_and_wind_are_renewable() {
        let renewable: Vec<_> = EnergySource::ALL
            .into_iter()
            .filter(|s| s.is_renewable())
            .collect();
        assert_eq!(renewable, vec![EnergySource::Solar, EnergySource::Wind]);
    }

    #[test]
    fn display_uses_column_names() {
        assert_eq!(EnergySource::Storage.to_string(), "storage");
        assert_eq!(EmissionType::NOx.to_string(), "NOx");
    }
}

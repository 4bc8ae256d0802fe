//! Core dispatch types: fixed generation input and hourly result rows.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, SimError};
use crate::sources::EnergySource;

/// Non-dispatchable hourly generation, one column per fixed source.
///
/// # Examples
///
/// ```
/// use roadmap_sim::sim::types::FixedProduction;
/// use roadmap_sim::sources::EnergySource;
///
/// let fixed = FixedProduction::new(3)
///     .with(EnergySource::Solar, vec![0.0, 2.0, 1.0])
///     .unwrap()
///     .with(EnergySource::Coal, vec![1.0; 3])
///     .unwrap();
/// assert_eq!(fixed.totals(), vec![1.0, 3.0, 2.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FixedProduction {
    hours: usize,
    columns: BTreeMap<EnergySource, Vec<f64>>,
}

impl FixedProduction {
    /// An empty table for `hours` hours.
    pub fn new(hours: usize) -> Self {
        Self {
            hours,
            columns: BTreeMap::new(),
        }
    }

    /// Adds or replaces the column for `source`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotFixedSource`] for dispatchable sources and
    /// [`SimError::LengthMismatch`] if the column is not `hours` long.
    pub fn insert(&mut self, source: EnergySource, values: Vec<f64>) -> Result<()> {
        if !source.is_fixed() {
            return Err(SimError::NotFixedSource(source));
        }
        if values.len() != self.hours {
            return Err(SimError::LengthMismatch {
                what: format!("{source} production"),
                expected: self.hours,
                actual: values.len(),
            });
        }
        self.columns.insert(source, values);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, source: EnergySource, values: Vec<f64>) -> Result<Self> {
        self.insert(source, values)?;
        Ok(self)
    }

    pub fn hours(&self) -> usize {
        self.hours
    }

    pub fn get(&self, source: EnergySource) -> Option<&[f64]> {
        self.columns.get(&source).map(Vec::as_slice)
    }

    pub fn sources(&self) -> impl Iterator<Item = EnergySource> + '_ {
        self.columns.keys().copied()
    }

    /// Sum of all fixed columns per hour.
    pub fn totals(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.hours];
        for column in self.columns.values() {
            for (t, v) in totals.iter_mut().zip(column) {
                *t += v;
            }
        }
        totals
    }
}

/// Complete record of one dispatched hour.
///
/// Fixed-source columns hold the generation that served demand, after
/// curtailment and storage charging have been taken out proportionally.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DispatchRow {
    /// Hour of the year.
    pub hour: usize,
    pub demand: f64,
    /// Demand left after fixed generation, never negative.
    pub net_demand: f64,
    /// Stored energy after this hour (kWh).
    pub battery_state: f64,
    /// Surplus fixed generation admitted into storage.
    pub fixed_storage_charge: f64,
    /// Surplus fixed generation that was neither used nor stored.
    pub curtailed_energy: f64,
    pub gas: f64,
    /// Energy discharged from storage.
    pub storage: f64,
    pub solar: f64,
    pub wind: f64,
    pub coal: f64,
}

impl DispatchRow {
    /// Generation attributed to `source` this hour.
    pub fn generation(&self, source: EnergySource) -> f64 {
        match source {
            EnergySource::Gas => self.gas,
            EnergySource::Storage => self.storage,
            EnergySource::Solar => self.solar,
            EnergySource::Wind => self.wind,
            EnergySource::Coal => self.coal,
        }
    }

    /// Fixed generation that served demand this hour.
    pub fn fixed_served(&self) -> f64 {
        self.solar + self.wind + self.coal
    }
}

/// One simulated year of hourly dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchTable {
    pub year: i32,
    pub rows: Vec<DispatchRow>,
}

impl DispatchTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Extracts one column by accessor.
    pub fn column(&self, f: impl Fn(&DispatchRow) -> f64) -> Vec<f64> {
        self.rows.iter().map(f).collect()
    }

    pub fn total(&self, f: impl Fn(&DispatchRow) -> f64) -> f64 {
        self.rows.iter().map(f).sum()
    }

    /// Yearly generation of `source`.
    pub fn total_generation(&self, source: EnergySource) -> f64 {
        self.total(|r| r.generation(source))
    }

    pub fn peak(&self, f: impl Fn(&DispatchRow) -> f64) -> f64 {
        self.rows.iter().map(f).fold(0.0, f64::max)
    }
}

impl fmt::Display for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Dispatch {} ({} hours) ---", self.year, self.len())?;
        writeln!(f, "Demand:          {:.1} kWh", self.total(|r| r.demand))?;
        for source in EnergySource::ALL {
            writeln!(
                f,
                "{:<16} {:.1} kWh",
                format!("{source}:"),
                self.total_generation(source)
            )?;
        }
        writeln!(f, "Stored:          {:.1} kWh", self.total(|r| r.fixed_storage_charge))?;
        write!(f, "Curtailed:       {:.1} kWh", self.total(|r| r.curtailed_energy))
    }
}

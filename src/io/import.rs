//! CSV readers for historical hourly inputs.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, SimError};
use crate::forecast::{DemandSeries, SolarRatio};

/// Column holding hourly demand.
pub const DEMAND_COLUMN: &str = "demand";
/// Column holding hourly solar production.
pub const SOLAR_COLUMN: &str = "solar_production";

/// Reads one numeric column by header name.
pub fn read_column(reader: impl Read, column: &str) -> Result<Vec<f64>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let index = rdr
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| SimError::Input(format!("missing column \"{column}\"")))?;

    let mut values = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let raw = record.get(index).unwrap_or_default();
        let value = raw.parse::<f64>().map_err(|e| {
            SimError::Input(format!(
                "row {}: column \"{column}\" value \"{raw}\": {e}",
                line + 1
            ))
        })?;
        values.push(value);
    }
    Ok(values)
}

/// Loads hourly demand observed in `year` from the `demand` column.
pub fn read_demand_csv(path: &Path, year: i32) -> Result<DemandSeries> {
    let values = read_column(File::open(path)?, DEMAND_COLUMN)?;
    Ok(DemandSeries::new(year, values))
}

/// Loads hourly solar production from the `solar_production` column,
/// min-max normalised into ratios.
pub fn read_solar_csv(path: &Path) -> Result<SolarRatio> {
    let production = read_column(File::open(path)?, SOLAR_COLUMN)?;
    SolarRatio::from_production(&production)
}

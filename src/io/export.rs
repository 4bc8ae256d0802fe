//! CSV export for dispatch tables and yearly costs.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::sim::costs::CostReport;
use crate::sim::types::DispatchTable;
use crate::sources::EnergySource;

/// Column header for dispatch CSV export.
const DISPATCH_HEADER: &str = "hour,demand,net_demand,battery_state,fixed_storage_charge,\
                               curtailed_energy,gas,storage,solar,wind,coal";

/// Exports one year of dispatch to a CSV file at the given path.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_dispatch_csv(table: &DispatchTable, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_dispatch_csv(table, io::BufWriter::new(file))
}

/// Writes one year of dispatch as CSV to any writer, one row per hour.
pub fn write_dispatch_csv(table: &DispatchTable, writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(DISPATCH_HEADER.split(',').map(str::trim))?;

    for r in &table.rows {
        wtr.write_record(&[
            r.hour.to_string(),
            format!("{:.4}", r.demand),
            format!("{:.4}", r.net_demand),
            format!("{:.4}", r.battery_state),
            format!("{:.4}", r.fixed_storage_charge),
            format!("{:.4}", r.curtailed_energy),
            format!("{:.4}", r.gas),
            format!("{:.4}", r.storage),
            format!("{:.4}", r.solar),
            format!("{:.4}", r.wind),
            format!("{:.4}", r.coal),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports yearly costs and running NPVs to a CSV file at the given path.
pub fn export_costs_csv(report: &CostReport, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_costs_csv(report, io::BufWriter::new(file))
}

/// Writes one row per year and source, plus an `externalities` row per year.
///
/// Columns: `year,source,capex,opex,variable_opex,total,npv`. Externality
/// rows carry their amount in `total` and leave the other cost columns empty.
pub fn write_costs_csv(report: &CostReport, writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(["year", "source", "capex", "opex", "variable_opex", "total", "npv"])?;

    for (year, npvs) in report.years.iter().zip(&report.npvs) {
        for source in EnergySource::ALL {
            let cost = year.get(source);
            let npv = npvs.get(&source).copied().unwrap_or(0.0);
            wtr.write_record(&[
                year.year.to_string(),
                source.to_string(),
                format!("{:.4}", cost.capex),
                format!("{:.4}", cost.opex),
                format!("{:.4}", cost.variable_opex),
                format!("{:.4}", cost.total()),
                format!("{npv:.4}"),
            ])?;
        }
        wtr.write_record(&[
            year.year.to_string(),
            "externalities".to_string(),
            String::new(),
            String::new(),
            String::new(),
            format!("{:.4}", year.externalities),
            String::new(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

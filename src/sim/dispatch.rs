//! Greedy hourly dispatch of storage and gas for one simulated year.
//!
//! Fixed generation is consumed first. Surplus charges the battery and the
//! rest is curtailed; any deficit is drawn from the battery and then from gas.

use crate::devices::Battery;
use crate::error::{Result, SimError};
use crate::sim::types::{DispatchRow, DispatchTable, FixedProduction};
use crate::sources::EnergySource;

/// Storage available to the dispatch for one year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageSpec {
    pub capacity_kwh: f64,
    pub efficiency: f64,
    /// Fraction of capacity that can move in or out per hour.
    pub charge_rate: f64,
}

/// Share of `part` in `whole`, zero when `whole` is zero.
fn rate(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { part / whole }
}

/// Runs one year of greedy dispatch starting from an empty battery.
///
/// # Errors
///
/// Returns [`SimError::LengthMismatch`] if `demand` and `fixed` cover a
/// different number of hours.
pub fn simulate_year(
    year: i32,
    demand: &[f64],
    fixed: &FixedProduction,
    storage: StorageSpec,
) -> Result<DispatchTable> {
    if demand.len() != fixed.hours() {
        return Err(SimError::LengthMismatch {
            what: "fixed production".to_string(),
            expected: demand.len(),
            actual: fixed.hours(),
        });
    }

    let fixed_gen = fixed.totals();
    let mut battery = Battery::empty(storage.capacity_kwh, storage.charge_rate, storage.efficiency);
    let mut rows = Vec::with_capacity(demand.len());

    // Battery state carries from hour to hour, so this fold stays sequential.
    for (hour, (&d, &generated)) in demand.iter().zip(&fixed_gen).enumerate() {
        let net_demand = (d - generated).max(0.0);
        let fixed_over_demand = (generated - d).max(0.0);

        let mut row = DispatchRow {
            hour,
            demand: d,
            net_demand,
            ..DispatchRow::default()
        };

        if net_demand == 0.0 {
            row.fixed_storage_charge = battery.try_charge(fixed_over_demand);
        } else {
            row.storage = battery.try_discharge(net_demand);
            if row.storage != net_demand {
                row.gas = net_demand - row.storage;
            }
        }
        row.battery_state = battery.curr_energy_kwh();
        row.curtailed_energy = fixed_over_demand - row.fixed_storage_charge;

        let waste_rate = rate(row.curtailed_energy, generated);
        let storage_rate = rate(row.fixed_storage_charge, generated);
        let demand_rate = 1.0 - waste_rate - storage_rate;
        let served = |source| fixed.get(source).map_or(0.0, |col| col[hour] * demand_rate);
        row.solar = served(EnergySource::Solar);
        row.wind = served(EnergySource::Wind);
        row.coal = served(EnergySource::Coal);

        rows.push(row);
    }

    Ok(DispatchTable { year, rows })
}

//! Roadmap simulator entry point: CLI wiring, input loading and reporting.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use roadmap_sim::cli::Cli;
use roadmap_sim::config::ModelConfig;
use roadmap_sim::io::export::{export_costs_csv, export_dispatch_csv};
use roadmap_sim::io::import::{read_demand_csv, read_solar_csv};
use roadmap_sim::profiles::synthetic_year;
use roadmap_sim::runner::{HourlyInputs, ScenarioEvaluation, evaluate_roadmap_with, evaluate_scenario};
use roadmap_sim::sim::types::DispatchTable;
use roadmap_sim::telemetry::init_logging;

/// Resolves a relative data path against the directory of the config file.
fn resolve(path: PathBuf, config_dir: &Path) -> PathBuf {
    if path.is_relative() {
        config_dir.join(path)
    } else {
        path
    }
}

fn load_config(cli: &Cli) -> Result<ModelConfig> {
    let mut cfg = if let Some(ref path) = cli.config {
        ModelConfig::from_toml_file(path)?
    } else if let Some(ref name) = cli.preset {
        ModelConfig::from_preset(name)?
    } else {
        ModelConfig::baseline()
    };

    if let Some(seed) = cli.seed {
        cfg.data.seed = seed;
    }

    if let Some(dir) = cli.config.as_deref().and_then(Path::parent) {
        cfg.data.demand_csv = cfg.data.demand_csv.map(|p| resolve(p, dir));
        cfg.data.solar_csv = cfg.data.solar_csv.map(|p| resolve(p, dir));
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        bail!("invalid configuration ({} errors)", errors.len());
    }
    Ok(cfg)
}

fn load_inputs(cfg: &ModelConfig) -> Result<HourlyInputs> {
    let data = &cfg.data;
    let (demand, solar) = match (&data.demand_csv, &data.solar_csv) {
        (Some(demand_path), Some(solar_path)) => {
            let demand = read_demand_csv(demand_path, data.demand_year).with_context(|| {
                format!("failed to read demand from \"{}\"", demand_path.display())
            })?;
            let solar = read_solar_csv(solar_path).with_context(|| {
                format!("failed to read solar production from \"{}\"", solar_path.display())
            })?;
            info!(hours = demand.len(), "loaded hourly inputs from CSV");
            (demand, solar)
        }
        _ => {
            info!(seed = data.seed, "using synthetic hourly profiles");
            synthetic_year(data.demand_year, data.seed)?
        }
    };
    Ok(HourlyInputs::new(demand, solar)?)
}

fn write_outputs(
    dir: &Path,
    id: &str,
    evaluation: &ScenarioEvaluation,
    tables: &[DispatchTable],
) -> roadmap_sim::error::Result<()> {
    for table in tables {
        export_dispatch_csv(table, &dir.join(format!("dispatch_{id}_{}.csv", table.year)))?;
    }
    export_costs_csv(&evaluation.costs, &dir.join(format!("costs_{id}.csv")))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = load_config(&cli)?;
    let inputs = load_inputs(&cfg)?;
    let params = cfg.params();
    let roadmap = cfg.roadmap()?;

    if let Some(ref dir) = cli.out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create \"{}\"", dir.display()))?;
    }

    let (bau, bau_tables) = evaluate_scenario(&roadmap.business_as_usual(), &inputs, &params)
        .context("business-as-usual evaluation failed")?;
    if let Some(ref dir) = cli.out_dir {
        write_outputs(dir, "bau", &bau, &bau_tables)?;
    }
    drop(bau_tables);
    println!("Business as usual ({})", bau.signature);
    println!("{}\n", bau.kpis);

    let out_dir = cli.out_dir.as_deref();
    let evaluations = evaluate_roadmap_with(
        &roadmap,
        &inputs,
        &params,
        cli.max_scenarios,
        |evaluation, tables| match out_dir {
            Some(dir) => write_outputs(dir, &evaluation.signature.to_string(), evaluation, tables),
            None => Ok(()),
        },
    )
    .context("roadmap evaluation failed")?;

    println!("{:<48} {:>12} {:>18} {:>16}", "scenario", "renewable %", "NPV", "externalities");
    for e in &evaluations {
        println!(
            "{:<48} {:>12.2} {:>18.2} {:>16.2}",
            e.signature.to_string(),
            e.kpis.renewable_pct,
            e.kpis.final_npv_total,
            e.kpis.total_externalities
        );
    }

    let cheapest = evaluations
        .iter()
        .min_by(|a, b| a.kpis.final_npv_total.total_cmp(&b.kpis.final_npv_total));
    if let Some(best) = cheapest {
        println!("\nLowest NPV ({})", best.signature);
        println!("{}", best.kpis);
    }

    if let Some(dir) = out_dir {
        eprintln!("Results written to {}", dir.display());
    }
    Ok(())
}

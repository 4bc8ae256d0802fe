//! Command-line arguments of the `roadmap-sim` binary.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "roadmap-sim")]
#[command(author, version, about = "National grid roadmap simulator")]
#[command(
    long_about = "Sweeps solar, wind and storage build-out roadmaps over a multi-year horizon.\n\
    \nEach scenario is dispatched hour by hour, costed and discounted to an NPV.\n\
    \nExamples:\n  \
    roadmap-sim                                   # baseline preset, synthetic profiles\n  \
    roadmap-sim --preset storage_push --max-scenarios 10\n  \
    roadmap-sim --config model.toml --out-dir results"
)]
pub struct Cli {
    /// Load the model from a TOML file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Use a built-in preset (baseline, solar_push, storage_push)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Write dispatch and cost CSVs for every scenario into this directory
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Evaluate at most this many enumerated scenarios
    #[arg(long, value_name = "N")]
    pub max_scenarios: Option<usize>,

    /// Override the synthetic profile seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    pub verbose: bool,
}

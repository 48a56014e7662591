use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use arbor::{
    engine::{EngineBuilder, EngineSettings},
    scenario::ScenarioLoader,
    snapshot,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Single-tree daily growth simulation")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/london_orchard.yaml")]
    scenario: PathBuf,

    /// Override the number of simulated years
    #[arg(long)]
    years: Option<u64>,

    /// Override snapshot interval in days (0 disables snapshots)
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Directory for snapshots
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Write the full per-day series to this JSON file
    #[arg(long)]
    series_out: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "arbor=trace"
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;

    let filter = cli
        .log_level
        .clone()
        .unwrap_or_else(|| scenario.logging.level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&filter).context("Invalid log filter")?)
        .init();

    let days = scenario.days(cli.years).context("Invalid --years")?;
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        snapshot_interval_days: cli
            .snapshot_interval
            .unwrap_or(scenario.snapshot_interval_days),
        snapshot_dir: cli
            .snapshot_dir
            .unwrap_or_else(|| PathBuf::from("snapshots")),
    };
    let mut engine =
        EngineBuilder::new(settings, scenario.build_tree(), scenario.weather_generator()).build();

    let (records, summary) = engine.run(days)?;
    if let Some(path) = &cli.series_out {
        snapshot::write_series(path, &scenario.name, &summary, &records)
            .with_context(|| format!("Failed to write series to {}", path.display()))?;
    }

    let last = summary.last.as_ref();
    println!(
        "Scenario '{}' completed for {} days. Final nutrients: {:.2}, size: {:.2}, health: {} ({}), total fruit: {}",
        scenario.name,
        summary.days,
        last.map_or(0.0, |s| s.stored_nutrients),
        last.map_or(0.0, |s| s.tree_size),
        last.map_or(0.0, |s| s.health),
        last.map_or("n/a", |s| s.health_status.label()),
        summary.total_fruit,
    );
    Ok(())
}

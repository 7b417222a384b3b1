use fieldsim::configuration::config::DimensionConfig;
use fieldsim::ScenarioConfig;
use fieldsim::{run_2d, run_3d};
use fieldsim::{bench_connections, bench_step};

use anyhow::{Context, Result};
use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "magnetic_stars.yaml")]
    file_name: String,

    /// Run the timing benchmarks instead of the viewer
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    ScenarioConfig::load(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        // The viewer gets its subscriber from Bevy; benchmarks need their own
        tracing_subscriber::fmt::init();
        bench_connections();
        bench_step();
        tracing::info!("benchmarks finished");
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;

    match scenario_cfg.engine.dimension {
        DimensionConfig::Flat => run_2d(scenario_cfg),
        DimensionConfig::Volume => run_3d(scenario_cfg),
    }

    Ok(())
}

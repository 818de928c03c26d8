use tbsim::{ScenarioConfig, Scenario};
use tbsim::run_console;
use tbsim::{bench_tick, bench_energy_drift_curve};

use clap::Parser;
use anyhow::{Context, Result};

use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "random.yaml")]
    file_name: String,

    /// Override the number of ticks from the scenario file
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the random seed from the scenario file
    #[arg(long)]
    seed: Option<u64>,

    /// Run the benchmarks instead of the simulation
    #[arg(long)]
    bench: bool,
}

// an existing path wins, otherwise look in the crate's scenarios/ directory
fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = scenario_path(file_name);
    let text = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read scenario {}", config_path.display()))?;
    let scenario_cfg = ScenarioConfig::from_yaml_str(&text)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;

    log::debug!("{:?}", scenario_cfg);

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_tick();
        bench_energy_drift_curve();
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(ticks) = args.ticks {
        scenario_cfg.run.ticks = ticks;
    }
    if let Some(seed) = args.seed {
        scenario_cfg.parameters.seed = seed;
    }

    let run = scenario_cfg.run.clone();
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;
    let summary = run_console(&mut scenario, &run);

    println!(
        "{} ticks, {} restarts{}; {}",
        summary.ticks,
        summary.restarts,
        if summary.halted { ", halted on a degenerate tick" } else { "" },
        summary.last_report,
    );

    Ok(())
}

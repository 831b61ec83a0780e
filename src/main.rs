use nbodysim::{relative_drift, Scenario, ScenarioConfig};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nbodysim", about = "Run a softened direct-summation N-body scenario")]
struct Args {
    /// Scenario YAML; bare names are looked up in the crate's scenarios/ directory
    #[arg(short, default_value = "two_body.yaml")]
    file_name: String,

    /// Override the number of steps from the scenario
    #[arg(short = 'n', long)]
    steps: Option<u64>,

    /// Report a density grid with this many cells per axis at the end of the run
    #[arg(long)]
    density: Option<usize>,

    /// Use cloud-in-cell instead of nearest-grid-point for the density grid
    #[arg(long)]
    cic: bool,
}

// load here to keep main clean
fn load_scenario(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn run<const D: usize>(cfg: &ScenarioConfig, args: &Args) -> Result<()> {
    let mut scenario = Scenario::<D>::build(cfg).context("invalid scenario")?;
    let steps = args.steps.unwrap_or(scenario.steps);
    let every = scenario.energy_every.max(1);

    let e0 = scenario.simulator.energy().total();
    info!("{}", scenario.simulator.energy_record());

    for i in 1..=steps {
        scenario.simulator.step();
        if i % every == 0 || i == steps {
            info!("{}", scenario.simulator.energy_record());
        }
    }

    let e1 = scenario.simulator.energy().total();
    info!("Relative energy drift after {} steps: {:.3e}", steps, relative_drift(e0, e1));

    if let Some(ngrid) = args.density {
        match scenario.density(ngrid, args.cic) {
            Ok(grid) => {
                let peak = grid.values().iter().cloned().fold(0.0, f64::max);
                info!(
                    "Density on {}^{} grid: peak {:.4e}, mass {:.6}",
                    grid.ngrid(),
                    D,
                    peak,
                    grid.total_mass()
                );
            }
            Err(e) => warn!("Skipping density grid: {e}"),
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cfg = load_scenario(&args.file_name)?;

    match cfg.engine.dimension {
        2 => run::<2>(&cfg, &args)?,
        3 => run::<3>(&cfg, &args)?,
        d => bail!("unsupported dimension {d}, expected 2 or 3"),
    }

    info!("Done!");
    Ok(())
}

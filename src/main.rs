use cellsim::{vtk, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Run a cell-list particle simulation from a YAML scenario")]
struct Args {
    /// Scenario YAML file
    scenario: PathBuf,

    /// Override the output directory (default: out/<scenario output name>)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Write a VTK snapshot every Nth step
    #[arg(long, default_value_t = 1)]
    export_every: usize,
}

fn load_scenario(path: &PathBuf) -> Result<ScenarioConfig> {
    let file =
        File::open(path).with_context(|| format!("opening scenario {}", path.display()))?;
    let cfg = serde_yaml::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing scenario {}", path.display()))?;
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let cfg = load_scenario(&args.scenario)?;

    let out_dir = args
        .out
        .unwrap_or_else(|| PathBuf::from("out").join(&cfg.output));
    let export_every = args.export_every.max(1);

    let mut scenario = Scenario::build(cfg)?;
    info!(
        particles = scenario.domain.particle_count(),
        steps = scenario.parameters.steps,
        out = %out_dir.display(),
        "scenario loaded"
    );

    let parameters = scenario.parameters.clone();
    scenario.domain.run(&parameters, |step, domain| {
        if step % export_every == 0 {
            // export failure is non-fatal: log and keep stepping
            if let Err(err) = vtk::write_step(&out_dir, step, domain.particles()) {
                warn!(step, error = %err, "VTK export failed, skipping this step");
            }
        }
        if step > 0 && step % 1000 == 0 {
            info!(step, particles = domain.particle_count(), "progress");
        }
    })?;

    info!("simulation finished");
    Ok(())
}

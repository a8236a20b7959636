use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use point_gravity::{Simulation, SimulationConfig};

/// Headless driver: steps a simulation on a fixed cadence and logs a summary
/// of each frame instead of drawing it.
#[derive(Parser, Debug)]
struct Args {
    /// JSON configuration file. Missing fields take their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of steps to run.
    #[arg(short, long, default_value_t = 100)]
    steps: usize,
    /// Wall-clock pause between steps, in milliseconds.
    #[arg(short, long, default_value_t = 100)]
    interval_ms: u64,
    /// Overrides the configured seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Overrides the configured point count.
    #[arg(short, long)]
    points: Option<usize>,
    /// Compute forces on all cores.
    #[arg(long)]
    parallel: bool,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(points) = args.points {
        config.point_count = points;
    }
    config.parallel |= args.parallel;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut sim = Simulation::initialize(config)?;
    let interval = Duration::from_millis(args.interval_ms);

    for _ in 0..args.steps {
        let started = Instant::now();
        sim.step();

        let visible = sim.snapshot().iter().filter(|p| p.is_visible()).count();
        log::info!(
            "Frame {}: {} visible points, total mass {:.1}, step took {:?}",
            sim.frame(),
            visible,
            sim.total_mass(),
            started.elapsed()
        );

        if let Some(rest) = interval.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }

    Ok(())
}

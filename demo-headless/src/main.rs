use clap::Parser;
use heat_diffusion_core::{
    save_grid_text, CancelHandle, HeatSimulation, InitPattern, RunState, SimulationConfig,
    TickEvent,
};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Headless heat diffusion run with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "heat-diffusion-demo")]
#[command(about = "Parallel Jacobi heat diffusion demo", long_about = None)]
struct Args {
    /// Initial layout (constant-left-wall, random-uniform, quarters, walls)
    #[arg(short, long, default_value = "constant-left-wall")]
    pattern: String,

    /// Grid edge length in cells
    #[arg(short, long, default_value_t = 64)]
    size: usize,

    /// Starting temperature of the pattern
    #[arg(short, long, default_value_t = 100.0)]
    magnitude: f64,

    /// Worker threads (defaults to available cores)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Stop once no cell changes by more than this per tick
    #[arg(short, long, default_value_t = 0.01)]
    threshold: f64,

    /// Seed for the random-uniform pattern
    #[arg(long)]
    seed: Option<u64>,

    /// Cancel the run after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Log progress every N ticks (0 = never)
    #[arg(short, long, default_value_t = 100)]
    report_interval: u64,

    /// Where to write the final grid
    #[arg(short, long, default_value = "final_grid.txt")]
    output: PathBuf,

    /// Decimals per value in the output file
    #[arg(long, default_value_t = 0)]
    precision: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // The engine rejects unknown names; the CLI falls back like the original prompt did
    let pattern = args.pattern.parse::<InitPattern>().unwrap_or_else(|e| {
        warn!("{}. Using constant-left-wall by default.", e);
        InitPattern::ConstantLeftWall
    });

    let mut config = SimulationConfig::new(pattern, args.size, args.magnitude)
        .with_threshold(args.threshold);
    if let Some(workers) = args.workers {
        config = config.with_worker_count(workers);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut sim = match HeatSimulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut progress = Progress {
        cancel: sim.cancel_handle(),
        max_ticks: args.max_ticks,
        report_interval: args.report_interval,
    };

    let started = Instant::now();
    let state = sim.run(&mut |event: &TickEvent<'_>| progress.on_tick(event));
    let elapsed = started.elapsed();

    info!(
        "Finished in state {:?} after {} ticks ({:.2}s, last delta {:.6e})",
        state,
        sim.ticks(),
        elapsed.as_secs_f64(),
        sim.last_delta().unwrap_or(f64::NAN)
    );

    let outcome = sim.into_outcome();
    if let Some(e) = &outcome.error {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    match save_grid_text(&outcome.grid, &args.output, args.precision) {
        Ok(()) => info!("Final heat distribution grid written to {}", args.output.display()),
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    if state == RunState::Converged {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

/// Progress reporting and tick budget
struct Progress {
    cancel: CancelHandle,
    max_ticks: Option<u64>,
    report_interval: u64,
}

impl Progress {
    fn on_tick(&mut self, event: &TickEvent<'_>) -> ControlFlow<()> {
        if self.report_interval > 0 && event.tick % self.report_interval == 0 {
            let grid = event.grid.as_slice();
            let mean = grid.iter().sum::<f64>() / grid.len() as f64;
            info!(
                "Tick {}: max delta {:.6e}, mean temperature {:.3}",
                event.tick, event.delta, mean
            );
        }

        if self.max_ticks.is_some_and(|max| event.tick >= max) {
            warn!("Tick budget of {} reached", event.tick);
            self.cancel.cancel();
        }

        ControlFlow::Continue(())
    }
}

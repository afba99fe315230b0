//! Relaxation run orchestration
//!
//! `HeatSimulation` owns the two grid buffers and the worker pool and drives
//! the tick loop:
//!
//! 1. refresh `current` from `previous` on the pool (join barrier)
//! 2. measure the largest per-cell change
//! 3. swap buffer roles
//! 4. publish the new grid to the subscriber
//!
//! ```text
//!            tick ok, delta > threshold
//!              ┌──────────┐
//!              ▼          │
//!          ┌─────────┐────┘   delta <= threshold   ┌───────────┐
//!          │ Running │────────────────────────────▶│ Converged │
//!          └─────────┘                             └───────────┘
//!            │     │    cancel / subscriber break  ┌───────────┐
//!            │     └──────────────────────────────▶│ Cancelled │
//!            │          worker failure             └───────────┘
//!            └────────────────────────────────────▶┌───────────┐
//!                                                  │  Failed   │
//!                                                  └───────────┘
//! ```

mod events;

pub use events::{CancelHandle, NoopSubscriber, RunOutcome, TickEvent, TickSubscriber};

use crate::config::SimulationConfig;
use crate::error::{HeatDiffusionError, Result};
use crate::grid::{initialize_from_config, Grid, GridStore};
use crate::solver::{BandKernel, JacobiKernel, WorkerPool};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    /// Ticks are still being computed
    Running,
    /// Largest change dropped to the threshold
    Converged,
    /// Stopped from outside between ticks
    Cancelled,
    /// A worker task failed
    Failed,
}

impl RunState {
    /// True for `Converged`, `Cancelled` and `Failed`
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunState::Running)
    }
}

/// Parallel Jacobi heat diffusion run
pub struct HeatSimulation {
    config: SimulationConfig,
    store: GridStore,
    pool: WorkerPool,
    kernel: Box<dyn BandKernel>,
    state: RunState,
    ticks: u64,
    last_delta: Option<f64>,
    failure: Option<HeatDiffusionError>,
    cancel: CancelHandle,
}

impl HeatSimulation {
    /// Create a simulation from a configuration
    ///
    /// Builds the initial grid from the configured pattern and starts the
    /// worker pool.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for invalid parameters and `ThreadPool`
    /// if the workers cannot be started.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let grid = initialize_from_config(&config)?;
        Self::from_grid(config, grid)
    }

    /// Create a simulation starting from an explicit grid
    ///
    /// The configured pattern is ignored; the grid's edge cells act as the
    /// fixed boundary.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the configuration is invalid or the
    /// grid size differs from `config.size`, and `ThreadPool` if the workers
    /// cannot be started.
    pub fn from_grid(config: SimulationConfig, grid: Grid) -> Result<Self> {
        config.validate()?;
        if grid.size() != config.size {
            return Err(HeatDiffusionError::invalid_parameter(
                "grid",
                &format!(
                    "size {} does not match configured size {}",
                    grid.size(),
                    config.size
                ),
            ));
        }

        let pool = WorkerPool::new(config.worker_count)?;

        info!(
            "Heat simulation initialized: {}x{} grid, pattern={}, magnitude={}, workers={}, threshold={}",
            config.size,
            config.size,
            config.init_pattern,
            config.magnitude,
            config.worker_count,
            config.convergence_threshold
        );

        Ok(Self {
            config,
            store: GridStore::new(grid),
            pool,
            kernel: Box::new(JacobiKernel),
            state: RunState::Running,
            ticks: 0,
            last_delta: None,
            failure: None,
            cancel: CancelHandle::new(),
        })
    }

    /// Replace the band kernel
    pub fn with_kernel(mut self, kernel: impl BandKernel + 'static) -> Self {
        self.kernel = Box::new(kernel);
        self
    }

    /// Configuration the run was built from
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Delta of the last completed tick
    pub fn last_delta(&self) -> Option<f64> {
        self.last_delta
    }

    /// Failure that moved the run to `Failed`
    pub fn failure(&self) -> Option<&HeatDiffusionError> {
        self.failure.as_ref()
    }

    /// Latest grid
    pub fn grid(&self) -> &Grid {
        self.store.latest()
    }

    /// Handle that cancels the run from any thread
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Advance one tick
    ///
    /// Returns the tick's largest per-cell change. The run moves to
    /// `Converged` when that change is at or below the threshold.
    ///
    /// # Errors
    ///
    /// Returns `Terminated` if the run already finished (or was cancelled
    /// before this tick), and `WorkerTaskFailure` if a band failed, in which
    /// case the run is now `Failed` and [`HeatSimulation::grid`] still returns
    /// the grid from before the tick.
    pub fn tick(&mut self) -> Result<f64> {
        if self.state == RunState::Running && self.cancel.is_cancelled() {
            self.finish_cancelled("cancel handle triggered");
        }
        if self.state.is_terminal() {
            return Err(HeatDiffusionError::Terminated(self.state));
        }

        let started = Instant::now();

        let (previous, current) = self.store.split_mut();
        if let Err(e) = self
            .pool
            .refresh_with(self.kernel.as_ref(), previous, current)
        {
            error!("Tick {} failed: {}", self.ticks + 1, e);
            self.state = RunState::Failed;
            self.failure = Some(e.clone());
            return Err(e);
        }

        let delta = self
            .pool
            .max_absolute_delta(self.store.previous(), self.store.current());
        self.store.swap_roles();
        self.ticks += 1;
        self.last_delta = Some(delta);

        debug!(
            "Tick {}: max delta {:.6e} ({:.3}ms)",
            self.ticks,
            delta,
            started.elapsed().as_secs_f64() * 1000.0
        );

        if delta <= self.config.convergence_threshold {
            self.state = RunState::Converged;
            info!(
                "Converged after {} ticks (max delta {:.6e} <= {})",
                self.ticks, delta, self.config.convergence_threshold
            );
        }

        Ok(delta)
    }

    /// Tick until a terminal state, publishing every tick to `subscriber`
    ///
    /// Cancellation (through the handle or a subscriber `Break`) is only
    /// observed between ticks.
    pub fn run<S>(&mut self, subscriber: &mut S) -> RunState
    where
        S: TickSubscriber + ?Sized,
    {
        while self.state == RunState::Running {
            if self.cancel.is_cancelled() {
                self.finish_cancelled("cancel handle triggered");
                break;
            }

            let Ok(delta) = self.tick() else {
                break;
            };

            let event = TickEvent {
                tick: self.ticks,
                delta,
                grid: self.store.latest(),
            };
            if subscriber.on_tick(&event).is_break() && self.state == RunState::Running {
                self.finish_cancelled("subscriber closed");
            }
        }

        self.state
    }

    /// Consume the simulation into its terminal event
    pub fn into_outcome(self) -> RunOutcome {
        RunOutcome {
            state: self.state,
            ticks: self.ticks,
            final_delta: self.last_delta,
            grid: self.store.into_latest(),
            error: self.failure,
        }
    }

    fn finish_cancelled(&mut self, reason: &str) {
        self.state = RunState::Cancelled;
        warn!("Run cancelled after {} ticks: {}", self.ticks, reason);
    }
}

/// Build a simulation, run it to a terminal state and return the outcome
///
/// # Errors
///
/// Returns configuration and pool start-up errors. Worker failures during the
/// run are reported through `RunOutcome::error` with state `Failed`.
pub fn run_simulation<S>(config: SimulationConfig, subscriber: &mut S) -> Result<RunOutcome>
where
    S: TickSubscriber + ?Sized,
{
    let mut simulation = HeatSimulation::new(config)?;
    simulation.run(subscriber);
    Ok(simulation.into_outcome())
}

//! Heat Diffusion Core Library
//!
//! Simulates 2-D steady-state heat diffusion on a square grid by parallel
//! Jacobi relaxation. Rows are split into bands, one per worker thread; every
//! tick relaxes all bands from a read-only snapshot, joins, measures the
//! largest change and swaps the two buffers until the grid stops moving.
//!
//! ## Example
//!
//! ```rust
//! use heat_diffusion_core::{HeatSimulation, InitPattern, NoopSubscriber, RunState, SimulationConfig};
//!
//! let config = SimulationConfig::new(InitPattern::Walls, 3, 50.0).with_worker_count(2);
//! let mut sim = HeatSimulation::new(config).unwrap();
//! assert_eq!(sim.run(&mut NoopSubscriber), RunState::Converged);
//! assert_eq!(sim.grid().get(1, 1), 50.0);
//! ```

#[allow(clippy::module_name_repetitions)]
pub mod config;
#[allow(clippy::module_name_repetitions)]
pub mod error;
pub mod grid;
pub mod persistence;
pub mod simulation;
pub mod solver;

// Re-export core types
pub use config::{InitPattern, SimulationConfig};
pub use error::{HeatDiffusionError, Result};
pub use grid::{Grid, GridStore};
pub use persistence::{load_grid_text, save_grid_text, write_grid_text, PersistenceError};
pub use simulation::{
    run_simulation, CancelHandle, HeatSimulation, NoopSubscriber, RunOutcome, RunState,
    TickEvent, TickSubscriber,
};
pub use solver::{max_absolute_delta, partition, Band, WorkerPool};

//! Parallel stencil engine
//!
//! Leaves first:
//! - [`partition`] splits the row range into one band per worker
//! - [`update_band`] relaxes one band from a read-only snapshot
//! - [`WorkerPool`] runs one band per thread and joins them every tick
//! - [`max_absolute_delta`] measures how far a tick moved the grid
//!
//! # Example
//!
//! ```rust
//! use heat_diffusion_core::grid::{initialize, Grid};
//! use heat_diffusion_core::solver::{max_absolute_delta, WorkerPool};
//! use heat_diffusion_core::InitPattern;
//!
//! let snapshot = initialize(InitPattern::Walls, 8, 50.0, None).unwrap();
//! let mut target = Grid::new(8);
//! let pool = WorkerPool::new(2).unwrap();
//! pool.refresh(&snapshot, &mut target).unwrap();
//! assert!(max_absolute_delta(&snapshot, &target) > 0.0);
//! ```

mod convergence;
mod kernel;
mod partition;
mod pool;
#[allow(clippy::module_name_repetitions)]
mod r#trait;

// Re-exports
pub use convergence::max_absolute_delta;
pub use kernel::{update_band, update_band_into};
pub use partition::{partition, Band};
pub use pool::WorkerPool;
pub use r#trait::{BandKernel, JacobiKernel};

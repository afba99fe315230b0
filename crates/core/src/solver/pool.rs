//! Fixed-size worker pool
//!
//! One `rayon::ThreadPool` is built when the simulation starts and reused for
//! every tick. `refresh` scatters one task per band and gathers them all
//! before returning, so callers never see a half-written target grid.

use super::convergence::max_absolute_delta;
use super::partition::{partition, Band};
use super::r#trait::{BandKernel, JacobiKernel};
use crate::error::{HeatDiffusionError, Result};
use crate::grid::{cell_count, Grid};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// Worker pool running one band per task
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    worker_count: usize,
}

impl WorkerPool {
    /// Build a pool with `worker_count` threads
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for a zero worker count and `ThreadPool`
    /// if the threads cannot be spawned.
    pub fn new(worker_count: usize) -> Result<Self> {
        if worker_count == 0 {
            return Err(HeatDiffusionError::invalid_parameter(
                "worker_count",
                "must be positive, got 0",
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|i| format!("heat-worker-{i}"))
            .build()
            .map_err(|e| HeatDiffusionError::ThreadPool(e.to_string()))?;

        debug!("Worker pool started with {} threads", worker_count);

        Ok(Self { pool, worker_count })
    }

    /// Number of worker threads (and bands per tick)
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Relax `target` from `snapshot` with the Jacobi kernel
    ///
    /// # Errors
    ///
    /// See [`WorkerPool::refresh_with`].
    pub fn refresh(&self, snapshot: &Grid, target: &mut Grid) -> Result<()> {
        self.refresh_with(&JacobiKernel, snapshot, target)
    }

    /// Relax `target` from `snapshot` with `kernel`, one task per band
    ///
    /// Blocks until every band has finished.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the grids differ in size or either
    /// one does not hold `size * size` values, and `WorkerTaskFailure` if any
    /// band returns an error or panics.
    pub fn refresh_with(
        &self,
        kernel: &dyn BandKernel,
        snapshot: &Grid,
        target: &mut Grid,
    ) -> Result<()> {
        let size = snapshot.size();
        if target.size() != size {
            return Err(HeatDiffusionError::invalid_parameter(
                "target",
                &format!(
                    "grid is {}x{}, snapshot is {size}x{size}",
                    target.size(),
                    target.size()
                ),
            ));
        }

        let cells = cell_count(size);
        for (name, grid) in [("snapshot", snapshot), ("target", &*target)] {
            if cells != Some(grid.len()) {
                return Err(HeatDiffusionError::invalid_parameter(
                    name,
                    &format!("holds {} values, expected {size}x{size}", grid.len()),
                ));
            }
        }

        let bands = partition(size, self.worker_count)?;

        // Disjoint row slices of the target, one per band
        let mut slices = Vec::with_capacity(bands.len());
        let mut rest = target.as_mut_slice();
        for band in bands {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(band.len() * size);
            slices.push((band, head));
            rest = tail;
        }

        self.pool.install(|| {
            slices
                .into_par_iter()
                .with_max_len(1)
                .try_for_each(|(band, out)| run_band(kernel, snapshot, band, out))
        })
    }

    /// Run the convergence reduction on the pool's threads
    pub fn max_absolute_delta(&self, a: &Grid, b: &Grid) -> f64 {
        self.pool.install(|| max_absolute_delta(a, b))
    }
}

fn run_band(kernel: &dyn BandKernel, snapshot: &Grid, band: Band, out: &mut [f64]) -> Result<()> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        kernel.update_band_into(snapshot, band, out)
    }))
    .unwrap_or_else(|payload| {
        Err(HeatDiffusionError::worker_failure(
            band,
            panic_message(payload.as_ref()),
        ))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let msg = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str));
    msg.map_or_else(
        || "worker panicked".to_string(),
        |msg| format!("worker panicked: {msg}"),
    )
}

//! Band kernel trait definition
//!
//! The worker pool only knows how to hand a band and its output rows to a
//! `BandKernel`. `JacobiKernel` is the production implementation.

use super::kernel::update_band_into;
use super::Band;
use crate::error::Result;
use crate::grid::Grid;

/// Per-band update step run by each worker
///
/// Implementations must only read `snapshot` and only write `out`, which holds
/// exactly the rows of `band` in the target grid.
pub trait BandKernel: Send + Sync {
    /// Compute the next iterate of `band` into `out`
    ///
    /// # Errors
    ///
    /// Any error aborts the whole tick.
    fn update_band_into(&self, snapshot: &Grid, band: Band, out: &mut [f64]) -> Result<()>;
}

/// Four-neighbour Jacobi relaxation
#[derive(Debug, Clone, Copy, Default)]
pub struct JacobiKernel;

impl BandKernel for JacobiKernel {
    fn update_band_into(&self, snapshot: &Grid, band: Band, out: &mut [f64]) -> Result<()> {
        update_band_into(snapshot, band, out)
    }
}

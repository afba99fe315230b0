//! Jacobi relaxation kernel
//!
//! Computes one band of the next iterate from a read-only snapshot:
//!
//! ```text
//! u'[r][c] = (u[r-1][c] + u[r+1][c] + u[r][c-1] + u[r][c+1]) / 4
//! ```
//!
//! Outer grid rows and columns are Dirichlet boundaries and are copied through
//! unchanged. A band reads one halo row above and below itself from the
//! snapshot, so rows sitting on a seam between two bands are relaxed exactly
//! like any other interior row. Freezing the first and last row of every band
//! (no halo) would make the result depend on the worker count; the
//! `band_seam_invariance` tests pin this down.

use super::Band;
use crate::error::{HeatDiffusionError, Result};
use crate::grid::Grid;

/// Compute the relaxed values of `band`
///
/// Returns `band.len() * size` values in row-major order.
///
/// # Errors
///
/// Returns `WorkerTaskFailure` if the band is reversed or extends past the
/// grid.
pub fn update_band(snapshot: &Grid, band: Band) -> Result<Vec<f64>> {
    check_band(band, snapshot.size())?;
    let mut out = vec![0.0; band.len() * snapshot.size()];
    update_band_into(snapshot, band, &mut out)?;
    Ok(out)
}

/// Write the relaxed values of `band` into `out`
///
/// `out` holds exactly the band's rows of the target grid.
///
/// # Errors
///
/// Returns `WorkerTaskFailure` if the band is reversed, extends past the grid,
/// or `out` has the wrong length.
pub fn update_band_into(snapshot: &Grid, band: Band, out: &mut [f64]) -> Result<()> {
    let size = snapshot.size();
    check_band(band, size)?;
    if out.len() != band.len() * size {
        return Err(HeatDiffusionError::worker_failure(
            band,
            format!(
                "output slice holds {} values, expected {}",
                out.len(),
                band.len() * size
            ),
        ));
    }
    if band.is_empty() {
        return Ok(());
    }

    for (row, out_row) in band.rows().zip(out.chunks_exact_mut(size)) {
        let centre = snapshot.row(row);

        if row == 0 || row == size - 1 {
            out_row.copy_from_slice(centre);
            continue;
        }

        // Halo rows may belong to a neighbouring band
        let up = snapshot.row(row - 1);
        let down = snapshot.row(row + 1);

        out_row[0] = centre[0];
        out_row[size - 1] = centre[size - 1];
        for col in 1..size - 1 {
            out_row[col] = 0.25 * (up[col] + down[col] + centre[col - 1] + centre[col + 1]);
        }
    }

    Ok(())
}

fn check_band(band: Band, size: usize) -> Result<()> {
    if band.start > band.end {
        return Err(HeatDiffusionError::worker_failure(
            band,
            "band ends before it starts",
        ));
    }
    if band.end > size {
        return Err(HeatDiffusionError::worker_failure(
            band,
            format!("band exceeds grid of {size} rows"),
        ));
    }
    Ok(())
}

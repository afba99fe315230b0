//! Convergence measurement

use crate::grid::Grid;
use rayon::prelude::*;

/// Largest absolute per-cell difference between two grids
///
/// NaN differences count as infinite so a diverged grid never looks converged.
///
/// # Panics
///
/// Panics if the grids have different sizes
pub fn max_absolute_delta(a: &Grid, b: &Grid) -> f64 {
    assert_eq!(a.size(), b.size(), "Grid shapes differ");

    a.as_slice()
        .par_iter()
        .zip(b.as_slice().par_iter())
        .map(|(x, y)| {
            let delta = (x - y).abs();
            if delta.is_nan() {
                f64::INFINITY
            } else {
                delta
            }
        })
        .reduce(|| 0.0, f64::max)
}

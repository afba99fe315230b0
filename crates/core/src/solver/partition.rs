//! Row partitioning
//!
//! Splits the row range `[0, total_rows)` into one contiguous band per worker.
//! Band sizes are derived from the row count, not the element count: sizing
//! from `rows * cols / workers` produces bands that overrun the grid for any
//! worker count below the edge length.

use crate::error::{HeatDiffusionError, Result};
use std::fmt;
use std::ops::Range;

/// Half-open row range `[start, end)` owned by one worker for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Band {
    /// First row (inclusive)
    pub start: usize,
    /// One past the last row
    pub end: usize,
}

impl Band {
    /// Create a band covering rows `start..end`
    ///
    /// # Panics
    ///
    /// Panics if `end < start`
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "Band end before start");
        Self { start, end }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the band owns no rows
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Rows as a `Range`
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Split `[0, total_rows)` into exactly `worker_count` bands
///
/// Every band gets `total_rows / worker_count` rows and the first
/// `total_rows % worker_count` bands take one extra row each, so the bands
/// cover every row exactly once. With more workers than rows the trailing
/// bands are empty.
///
/// # Errors
///
/// Returns `InvalidConfiguration` if either argument is zero.
pub fn partition(total_rows: usize, worker_count: usize) -> Result<Vec<Band>> {
    if total_rows == 0 {
        return Err(HeatDiffusionError::invalid_parameter(
            "total_rows",
            "must be positive, got 0",
        ));
    }
    if worker_count == 0 {
        return Err(HeatDiffusionError::invalid_parameter(
            "worker_count",
            "must be positive, got 0",
        ));
    }

    let band_size = total_rows / worker_count;
    let remainder = total_rows % worker_count;

    let mut bands = Vec::with_capacity(worker_count);
    let mut start = 0;
    for index in 0..worker_count {
        let len = band_size + usize::from(index < remainder);
        bands.push(Band::new(start, start + len));
        start += len;
    }
    debug_assert_eq!(start, total_rows);

    Ok(bands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_cover(bands: &[Band], total_rows: usize) {
        let mut owners = vec![0_u32; total_rows];
        for band in bands {
            for row in band.rows() {
                owners[row] += 1;
            }
        }
        assert!(
            owners.iter().all(|&count| count == 1),
            "rows not covered exactly once: {owners:?}"
        );
    }

    #[test]
    fn test_even_split() {
        let bands = partition(12, 4).unwrap();
        assert_eq!(
            bands,
            vec![
                Band::new(0, 3),
                Band::new(3, 6),
                Band::new(6, 9),
                Band::new(9, 12)
            ]
        );
    }

    #[test]
    fn test_remainder_rows_are_assigned() {
        let bands = partition(10, 4).unwrap();
        assert_eq!(bands.len(), 4);
        assert_eq!(
            bands.iter().map(Band::len).collect::<Vec<_>>(),
            vec![3, 3, 2, 2]
        );
        assert_exact_cover(&bands, 10);
    }

    #[test]
    fn test_every_worker_count_covers_all_rows() {
        for total_rows in 1..=40 {
            for worker_count in 1..=total_rows {
                let bands = partition(total_rows, worker_count).unwrap();
                assert_eq!(bands.len(), worker_count);
                assert_exact_cover(&bands, total_rows);
            }
        }
    }

    #[test]
    fn test_more_workers_than_rows() {
        let bands = partition(3, 5).unwrap();
        assert_eq!(bands.len(), 5);
        assert_exact_cover(&bands, 3);
        assert!(bands[3].is_empty() && bands[4].is_empty());
    }

    #[test]
    fn test_zero_arguments_rejected() {
        assert!(partition(0, 2).is_err());
        assert!(partition(8, 0).is_err());
    }

    #[test]
    fn test_band_display() {
        assert_eq!(Band::new(2, 5).to_string(), "[2, 5)");
    }
}

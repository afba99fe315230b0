//! Square temperature grid
//!
//! Stores an N×N field as a flat `Vec<f64>` in row-major order
//! (`row * size + col`).

use crate::error::{HeatDiffusionError, Result};
use serde::{Deserialize, Serialize};

/// Square temperature field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    data: Vec<f64>,
    size: usize,
}

/// Unchecked serialized form, validated through [`Grid::from_rows`]
#[derive(Deserialize)]
struct RawGrid {
    data: Vec<f64>,
    size: usize,
}

impl TryFrom<RawGrid> for Grid {
    type Error = HeatDiffusionError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        Grid::from_rows(raw.size, raw.data)
    }
}

/// Number of cells in a `size × size` grid, `None` on overflow
pub fn cell_count(size: usize) -> Option<usize> {
    size.checked_mul(size)
}

impl Grid {
    /// Create a `size × size` grid filled with zeros
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self::with_value(size, 0.0)
    }

    /// Create a `size × size` grid filled with `value`
    ///
    /// # Panics
    ///
    /// Panics if `size * size` overflows `usize`
    #[must_use]
    pub fn with_value(size: usize, value: f64) -> Self {
        let cells = cell_count(size).expect("Grid size overflows usize");
        Self {
            data: vec![value; cells],
            size,
        }
    }

    /// Wrap row-major `data` as a `size × size` grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `size` is zero or `data` does not
    /// hold exactly `size * size` values.
    pub fn from_rows(size: usize, data: Vec<f64>) -> Result<Self> {
        if size == 0 {
            return Err(HeatDiffusionError::invalid_parameter(
                "size",
                "must be positive, got 0",
            ));
        }
        let Some(cells) = cell_count(size) else {
            return Err(HeatDiffusionError::invalid_parameter(
                "size",
                &format!("{size}x{size} cells overflow usize"),
            ));
        };
        if data.len() != cells {
            return Err(HeatDiffusionError::invalid_parameter(
                "data",
                &format!(
                    "expected {cells} values for a {size}x{size} grid, got {}",
                    data.len()
                ),
            ));
        }
        Ok(Self { data, size })
    }

    /// Edge length in cells
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a zero-sized grid
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major cell values
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable row-major cell values
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the grid, returning its row-major values
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Get the temperature at (`row`, `col`)
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(
            row < self.size && col < self.size,
            "Coordinates out of bounds"
        );
        self.data[row * self.size + col]
    }

    /// Set the temperature at (`row`, `col`)
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(
            row < self.size && col < self.size,
            "Coordinates out of bounds"
        );
        self.data[row * self.size + col] = value;
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.size..(row + 1) * self.size]
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.data.chunks_exact(self.size.max(1))
    }

    /// Fill every cell with `value`
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// True when (`row`, `col`) lies on the outer edge
    pub fn is_boundary(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row + 1 == self.size || col + 1 == self.size
    }
}

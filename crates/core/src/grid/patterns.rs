//! Initial temperature layouts

use super::{cell_count, Grid};
use crate::config::{InitPattern, SimulationConfig};
use crate::error::{HeatDiffusionError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build the initial grid for `pattern`
///
/// `seed` only matters for `random-uniform`; `None` seeds from the OS.
///
/// # Errors
///
/// Returns `InvalidConfiguration` if `size` is zero, `size * size` overflows,
/// or `magnitude` is not finite.
pub fn initialize(
    pattern: InitPattern,
    size: usize,
    magnitude: f64,
    seed: Option<u64>,
) -> Result<Grid> {
    if size == 0 {
        return Err(HeatDiffusionError::invalid_parameter(
            "size",
            "must be positive, got 0",
        ));
    }
    if cell_count(size).is_none() {
        return Err(HeatDiffusionError::invalid_parameter(
            "size",
            &format!("{size}x{size} cells overflow usize"),
        ));
    }
    if !magnitude.is_finite() {
        return Err(HeatDiffusionError::invalid_parameter(
            "magnitude",
            &format!("must be finite, got {magnitude}"),
        ));
    }

    let mut grid = Grid::new(size);
    let last = size - 1;

    match pattern {
        InitPattern::ConstantLeftWall => {
            for row in 0..size {
                grid.set(row, 0, magnitude);
            }
        }
        InitPattern::RandomUniform => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            // random::<f64>() is in [0, 1), which keeps the upper bound open
            // for negative magnitudes too
            for cell in grid.as_mut_slice() {
                *cell = rng.random::<f64>() * magnitude;
            }
        }
        InitPattern::Quarters => {
            let half = size / 2;
            for row in 0..size {
                for col in 0..size {
                    let value = match (row < half, col < half) {
                        (true, true) => magnitude,
                        (false, false) => magnitude / 2.0,
                        (true, false) => magnitude / 4.0,
                        (false, true) => 0.0,
                    };
                    grid.set(row, col, value);
                }
            }
        }
        InitPattern::Walls => {
            for i in 0..size {
                grid.set(i, 0, magnitude);
                grid.set(0, i, magnitude);
                grid.set(last, i, magnitude);
                grid.set(i, last, magnitude);
            }
        }
    }

    Ok(grid)
}

/// Build the initial grid described by `config`
///
/// # Errors
///
/// Propagates validation failures from [`SimulationConfig::validate`].
pub fn initialize_from_config(config: &SimulationConfig) -> Result<Grid> {
    config.validate()?;
    initialize(
        config.init_pattern,
        config.size,
        config.magnitude,
        config.seed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_left_wall() {
        let grid = initialize(InitPattern::ConstantLeftWall, 5, 100.0, None).unwrap();
        for row in 0..5 {
            assert_eq!(grid.get(row, 0), 100.0);
            for col in 1..5 {
                assert_eq!(grid.get(row, col), 0.0, "cell ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_random_uniform_in_range() {
        let grid = initialize(InitPattern::RandomUniform, 20, 40.0, Some(7)).unwrap();
        assert!(grid.as_slice().iter().all(|&v| (0.0..40.0).contains(&v)));

        // Not all identical
        let first = grid.as_slice()[0];
        assert!(grid.as_slice().iter().any(|&v| v != first));
    }

    #[test]
    fn test_random_uniform_seed_is_reproducible() {
        let a = initialize(InitPattern::RandomUniform, 8, 10.0, Some(42)).unwrap();
        let b = initialize(InitPattern::RandomUniform, 8, 10.0, Some(42)).unwrap();
        let c = initialize(InitPattern::RandomUniform, 8, 10.0, Some(43)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_quarters() {
        let grid = initialize(InitPattern::Quarters, 4, 80.0, None).unwrap();
        assert_eq!(grid.get(0, 0), 80.0); // top-left
        assert_eq!(grid.get(1, 1), 80.0);
        assert_eq!(grid.get(0, 3), 20.0); // top-right
        assert_eq!(grid.get(3, 3), 40.0); // bottom-right
        assert_eq!(grid.get(2, 2), 40.0);
        assert_eq!(grid.get(3, 0), 0.0); // bottom-left
    }

    #[test]
    fn test_quarters_odd_size() {
        // half = 2: the middle row/column belongs to the lower/right quadrants
        let grid = initialize(InitPattern::Quarters, 5, 8.0, None).unwrap();
        assert_eq!(grid.get(1, 1), 8.0);
        assert_eq!(grid.get(2, 2), 4.0);
        assert_eq!(grid.get(1, 2), 2.0);
        assert_eq!(grid.get(2, 1), 0.0);
    }

    #[test]
    fn test_walls() {
        let grid = initialize(InitPattern::Walls, 4, 50.0, None).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                let expected = if grid.is_boundary(row, col) { 50.0 } else { 0.0 };
                assert_eq!(grid.get(row, col), expected, "cell ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_single_cell_grid() {
        let grid = initialize(InitPattern::Walls, 1, 3.0, None).unwrap();
        assert_eq!(grid.as_slice(), &[3.0]);
    }

    #[test]
    fn test_rejects_zero_size() {
        assert!(initialize(InitPattern::Walls, 0, 1.0, None).is_err());
        assert!(initialize(InitPattern::Walls, usize::MAX, 1.0, None).is_err());
    }

    #[test]
    fn test_from_config_validates() {
        let config = SimulationConfig::new(InitPattern::Walls, 6, 1.0).with_worker_count(0);
        assert!(initialize_from_config(&config).is_err());
    }
}

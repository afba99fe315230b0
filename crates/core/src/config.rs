//! Simulation configuration
//!
//! A `SimulationConfig` is built once by the caller (CLI, tests, an embedding
//! application) and validated before the engine starts. The engine never asks
//! for input on its own.

use crate::error::{HeatDiffusionError, Result};
use crate::grid::cell_count;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Initial temperature layout of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitPattern {
    /// Column 0 at the magnitude, everything else cold
    ConstantLeftWall,
    /// Every cell uniform in `[0, magnitude)`
    RandomUniform,
    /// Quadrants at magnitude, magnitude/2, magnitude/4 and 0
    Quarters,
    /// All four outer edges at the magnitude, interior cold
    Walls,
}

impl InitPattern {
    /// All supported patterns
    pub const ALL: [InitPattern; 4] = [
        InitPattern::ConstantLeftWall,
        InitPattern::RandomUniform,
        InitPattern::Quarters,
        InitPattern::Walls,
    ];

    /// Canonical kebab-case name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ConstantLeftWall => "constant-left-wall",
            Self::RandomUniform => "random-uniform",
            Self::Quarters => "quarters",
            Self::Walls => "walls",
        }
    }
}

impl fmt::Display for InitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InitPattern {
    type Err = HeatDiffusionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.name() == s)
            .ok_or_else(|| {
                HeatDiffusionError::invalid_parameter(
                    "init_pattern",
                    &format!("unknown pattern '{s}'"),
                )
            })
    }
}

/// Number of worker threads used when the caller does not choose one
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

/// Validated run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Initial layout
    pub init_pattern: InitPattern,
    /// Grid edge length in cells (grid is `size × size`)
    pub size: usize,
    /// Characteristic temperature of the pattern
    pub magnitude: f64,
    /// Worker threads (and bands per tick)
    pub worker_count: usize,
    /// Run stops once the largest per-cell change is at or below this
    pub convergence_threshold: f64,
    /// Seed for `random-uniform`; `None` draws from the OS
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Create a configuration with default worker count and a zero threshold
    pub fn new(init_pattern: InitPattern, size: usize, magnitude: f64) -> Self {
        Self {
            init_pattern,
            size,
            magnitude,
            worker_count: default_worker_count(),
            convergence_threshold: 0.0,
            seed: None,
        }
    }

    /// Set the number of workers
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Fix the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when `size` or `worker_count` is zero,
    /// when `size * size` overflows,
    /// when `magnitude` is not finite, or when the threshold is negative or NaN.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(HeatDiffusionError::invalid_parameter(
                "size",
                "must be positive, got 0",
            ));
        }
        if cell_count(self.size).is_none() {
            return Err(HeatDiffusionError::invalid_parameter(
                "size",
                &format!("{0}x{0} cells overflow usize", self.size),
            ));
        }
        if self.worker_count == 0 {
            return Err(HeatDiffusionError::invalid_parameter(
                "worker_count",
                "must be positive, got 0",
            ));
        }
        if !self.magnitude.is_finite() {
            return Err(HeatDiffusionError::invalid_parameter(
                "magnitude",
                &format!("must be finite, got {}", self.magnitude),
            ));
        }
        if self.convergence_threshold.is_nan() || self.convergence_threshold < 0.0 {
            return Err(HeatDiffusionError::invalid_parameter(
                "convergence_threshold",
                &format!("must be non-negative, got {}", self.convergence_threshold),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_names_parse() {
        for pattern in InitPattern::ALL {
            assert_eq!(pattern.name().parse::<InitPattern>(), Ok(pattern));
        }
    }

    #[test]
    fn test_unknown_pattern_rejected() {
        let err = "constant".parse::<InitPattern>().unwrap_err();
        assert!(matches!(err, HeatDiffusionError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("constant"));
    }

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::new(InitPattern::Walls, 16, 50.0);
        assert!(config.worker_count >= 1);
        assert_eq!(config.convergence_threshold, 0.0);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = SimulationConfig::new(InitPattern::Quarters, 8, 10.0);

        let zero_size = SimulationConfig { size: 0, ..base.clone() };
        assert!(zero_size.validate().is_err());

        let huge = SimulationConfig {
            size: usize::MAX,
            ..base.clone()
        };
        assert!(matches!(
            huge.validate(),
            Err(HeatDiffusionError::InvalidConfiguration(_))
        ));

        assert!(base.clone().with_worker_count(0).validate().is_err());
        assert!(base.clone().with_threshold(-0.5).validate().is_err());
        assert!(base.clone().with_threshold(f64::NAN).validate().is_err());

        let infinite = SimulationConfig {
            magnitude: f64::INFINITY,
            ..base
        };
        assert!(infinite.validate().is_err());
    }

    #[test]
    fn test_negative_magnitude_allowed() {
        let config = SimulationConfig::new(InitPattern::RandomUniform, 4, -20.0);
        assert!(config.validate().is_ok());
    }
}

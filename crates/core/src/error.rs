//! Error types for the relaxation engine
//!
//! Configuration problems are reported before a run starts. Worker failures
//! abort the tick that raised them and move the simulation to `Failed`.

use crate::simulation::RunState;
use crate::solver::Band;

/// Errors raised by the core engine
#[derive(Debug, Clone, PartialEq)]
pub enum HeatDiffusionError {
    /// Rejected configuration (unknown pattern, zero size, zero workers, ...)
    InvalidConfiguration(String),
    /// A band update returned an error or panicked
    WorkerTaskFailure {
        /// Band whose update failed
        band: Band,
        /// Failure description
        reason: String,
    },
    /// The worker thread pool could not be created
    ThreadPool(String),
    /// `tick` was called after the run reached a terminal state
    Terminated(RunState),
}

impl HeatDiffusionError {
    /// Create a configuration error for a named parameter
    ///
    /// # Arguments
    /// * `param_name` - Name of the offending parameter (e.g. `"size"`)
    /// * `message` - What is wrong with it
    pub fn invalid_parameter(param_name: &str, message: &str) -> Self {
        Self::InvalidConfiguration(format!("{param_name}: {message}"))
    }

    /// Create a worker failure for `band`
    pub fn worker_failure(band: Band, reason: impl Into<String>) -> Self {
        Self::WorkerTaskFailure {
            band,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for HeatDiffusionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeatDiffusionError::InvalidConfiguration(msg) => {
                write!(f, "Invalid configuration: {msg}")
            }
            HeatDiffusionError::WorkerTaskFailure { band, reason } => {
                write!(f, "Worker failed on rows {band}: {reason}")
            }
            HeatDiffusionError::ThreadPool(msg) => {
                write!(f, "Failed to build worker pool: {msg}")
            }
            HeatDiffusionError::Terminated(state) => {
                write!(f, "Simulation already finished ({state:?})")
            }
        }
    }
}

impl std::error::Error for HeatDiffusionError {}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, HeatDiffusionError>;

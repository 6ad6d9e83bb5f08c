//! Error types for the simulation engine.

use sim_core::ParamsError;

/// Errors raised by [`SimulationEngine`](crate::engine::SimulationEngine)
/// configuration and execution.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Engine configuration failed validation.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    /// Simulation parameters failed validation.
    #[error("invalid simulation parameters: {0}")]
    Params(#[from] ParamsError),

    /// Total path count does not fit in a usize.
    #[error("path count overflow: {n_workers} workers x {paths_per_worker} paths per worker")]
    PathCountOverflow {
        /// Configured worker count.
        n_workers: usize,
        /// Configured paths per worker.
        paths_per_worker: usize,
    },

    /// Storage for the configured path volume could not be allocated.
    ///
    /// Fatal for the run; a batch simulation has no degraded mode.
    #[error("failed to allocate storage for {requested} PnL samples")]
    Allocation {
        /// Number of samples the allocation was sized for.
        requested: usize,
    },
}

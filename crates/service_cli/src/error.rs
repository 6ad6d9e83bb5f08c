//! CLI error type and result alias.

use thiserror::Error;

/// Result alias used throughout the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

/// Top-level CLI error, converted from every layer below.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid simulation parameters.
    #[error("configuration error: {0}")]
    Params(#[from] sim_core::ParamsError),

    /// Engine configuration or execution failure.
    #[error("engine error: {0}")]
    Engine(#[from] sim_engine::EngineError),

    /// Risk-metric computation failure.
    #[error("risk error: {0}")]
    Risk(#[from] sim_risk::RiskError),
}

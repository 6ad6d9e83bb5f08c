//! GBM simulation parameters with construction-time validation.
//!
//! The process simulated by the engine is geometric Brownian motion in
//! log space:
//!
//! ```text
//! S(t+dt) = S(t) * exp((mu - 0.5*sigma^2)*dt + sigma*sqrt(dt)*Z)
//! ```
//!
//! Parameters are validated once, at construction, so downstream code
//! never has to guard against a non-positive step size or a NaN drift
//! mid-simulation. Use the builder via [`SimulationParams::builder()`].

use thiserror::Error;

/// Errors raised while constructing [`SimulationParams`].
///
/// All variants are configuration invariant violations: they are fatal
/// at startup and never produced mid-run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    /// Initial price must be strictly positive.
    #[error("initial price must be positive, got {0}")]
    NonPositiveSpot(f64),

    /// Volatility must be non-negative and finite.
    #[error("volatility must be non-negative and finite, got {0}")]
    InvalidVolatility(f64),

    /// Drift must be finite.
    #[error("drift must be finite, got {0}")]
    InvalidDrift(f64),

    /// Horizon must be strictly positive and finite.
    #[error("horizon must be positive and finite, got {0} years")]
    NonPositiveHorizon(f64),

    /// Step count must be at least one, otherwise dt is undefined.
    #[error("step count must be at least 1")]
    ZeroSteps,
}

/// Immutable GBM simulation parameters.
///
/// Constructed through [`SimulationParams::builder()`]; a successfully
/// built value satisfies every invariant the engine relies on, in
/// particular `dt() > 0`.
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `s0` | 100.0 | Initial price |
/// | `mu` | 0.05 | Annualised drift |
/// | `sigma` | 0.2 | Annualised volatility |
/// | `horizon` | 1/252 | Horizon in years (1 trading day) |
/// | `n_steps` | 10 | Discretisation steps over the horizon |
///
/// # Examples
///
/// ```rust
/// use sim_core::params::SimulationParams;
///
/// let params = SimulationParams::builder()
///     .sigma(0.3)
///     .build()
///     .unwrap();
/// assert_eq!(params.sigma(), 0.3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    s0: f64,
    mu: f64,
    sigma: f64,
    horizon: f64,
    n_steps: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            s0: 100.0,
            mu: 0.05,
            sigma: 0.2,
            horizon: 1.0 / 252.0,
            n_steps: 10,
        }
    }
}

impl SimulationParams {
    /// Creates a new builder with default parameter values.
    pub fn builder() -> SimulationParamsBuilder {
        SimulationParamsBuilder::default()
    }

    /// Initial price S0.
    #[inline]
    pub fn s0(&self) -> f64 {
        self.s0
    }

    /// Annualised drift.
    #[inline]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Annualised volatility.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Horizon in years.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Number of discretisation steps over the horizon.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Step size in years. Strictly positive for any built value.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.horizon / self.n_steps as f64
    }

    /// Validates the parameter set.
    ///
    /// Called by the builder; exposed so a deserialised or manually
    /// assembled value can be re-checked.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.s0.is_finite() || self.s0 <= 0.0 {
            return Err(ParamsError::NonPositiveSpot(self.s0));
        }
        if !self.mu.is_finite() {
            return Err(ParamsError::InvalidDrift(self.mu));
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(ParamsError::InvalidVolatility(self.sigma));
        }
        if !self.horizon.is_finite() || self.horizon <= 0.0 {
            return Err(ParamsError::NonPositiveHorizon(self.horizon));
        }
        if self.n_steps == 0 {
            return Err(ParamsError::ZeroSteps);
        }
        Ok(())
    }
}

/// Builder for [`SimulationParams`].
#[derive(Clone, Debug, Default)]
pub struct SimulationParamsBuilder {
    params: SimulationParams,
}

impl SimulationParamsBuilder {
    /// Sets the initial price.
    pub fn s0(mut self, s0: f64) -> Self {
        self.params.s0 = s0;
        self
    }

    /// Sets the annualised drift.
    pub fn mu(mut self, mu: f64) -> Self {
        self.params.mu = mu;
        self
    }

    /// Sets the annualised volatility.
    pub fn sigma(mut self, sigma: f64) -> Self {
        self.params.sigma = sigma;
        self
    }

    /// Sets the horizon in years.
    pub fn horizon(mut self, horizon: f64) -> Self {
        self.params.horizon = horizon;
        self
    }

    /// Sets the number of discretisation steps.
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.params.n_steps = n_steps;
        self
    }

    /// Validates and returns the parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError`] if any invariant is violated.
    pub fn build(self) -> Result<SimulationParams, ParamsError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

//! Historical VaR and CVaR from a sorted PnL distribution.
//!
//! # Quantile Convention
//!
//! For tail probability `c` and sample size `N`, the tail index is
//! `k = floor(c * N)`, 0-indexed into the ascending sorted samples:
//!
//! - `VaR  = sorted[k]` — the PnL at the tail cutoff
//! - `CVaR = mean(sorted[0..=k])` — the average of the `k + 1` worst
//!   outcomes, so `CVaR <= VaR` holds by construction
//!
//! For `N = 100`, `c = 0.05`: `k = 5`, VaR is the 6th smallest sample
//! and CVaR averages 6 values. The index is guarded, never clamped: a
//! tail index outside `[0, N)` is an error, not an out-of-bounds read.

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

/// Errors raised during risk-metric computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// No samples to compute metrics from.
    #[error("cannot compute risk metrics over an empty sample set")]
    EmptySample,

    /// Tail probability outside the open interval (0, 1).
    #[error("tail probability must be in (0, 1), got {0}")]
    InvalidTailProbability(f64),

    /// Tail index fell outside the sample range.
    #[error("tail index {index} out of bounds for {len} samples")]
    TailIndexOutOfBounds {
        /// Computed tail index.
        index: usize,
        /// Sample count.
        len: usize,
    },
}

/// Confidence configuration for tail metrics.
///
/// Holds the tail probability `c`; the reported confidence level is
/// `1 - c` (default 0.05, i.e. 95% confidence).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskConfig {
    tail_probability: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            tail_probability: 0.05,
        }
    }
}

impl RiskConfig {
    /// Creates a configuration with the given tail probability.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidTailProbability`] unless
    /// `tail_probability` lies strictly between 0 and 1.
    pub fn new(tail_probability: f64) -> Result<Self, RiskError> {
        if !tail_probability.is_finite() || tail_probability <= 0.0 || tail_probability >= 1.0 {
            return Err(RiskError::InvalidTailProbability(tail_probability));
        }
        Ok(Self { tail_probability })
    }

    /// Tail probability `c`.
    #[inline]
    pub fn tail_probability(&self) -> f64 {
        self.tail_probability
    }

    /// Confidence level `1 - c`.
    #[inline]
    pub fn confidence(&self) -> f64 {
        1.0 - self.tail_probability
    }
}

/// Immutable tail-risk summary of a PnL distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskMetrics {
    /// Mean PnL, `total / N`.
    pub mean: f64,
    /// Value-at-Risk at the configured confidence level.
    pub var: f64,
    /// Conditional Value-at-Risk (expected shortfall) at the
    /// configured confidence level.
    pub cvar: f64,
    /// Confidence level the metrics were computed at, `1 - c`.
    pub confidence: f64,
}

/// Computes mean, VaR and CVaR over a finalised sample collection.
///
/// `total` is the globally reduced PnL sum from the parallel run; the
/// mean is `total / N` rather than a re-summation, so it doubles as a
/// cross-check of the aggregation (see the crate tests). The input is
/// never mutated; sorting happens on a private copy.
///
/// # Errors
///
/// - [`RiskError::EmptySample`] for an empty collection
/// - [`RiskError::TailIndexOutOfBounds`] if the quantile convention
///   would index past the end (impossible for `c` in (0, 1), but
///   guarded rather than clamped)
///
/// # Examples
///
/// ```rust
/// use sim_risk::{compute_risk_metrics, RiskConfig};
///
/// let pnls = [-10.0, -8.0, -5.0, -3.0, -1.0, 0.0, 2.0, 4.0, 6.0, 9.0];
/// let total: f64 = pnls.iter().sum();
///
/// let metrics = compute_risk_metrics(&pnls, total, &RiskConfig::default()).unwrap();
/// assert_eq!(metrics.var, -10.0);
/// assert_eq!(metrics.cvar, -10.0);
/// ```
pub fn compute_risk_metrics(
    samples: &[f64],
    total: f64,
    config: &RiskConfig,
) -> Result<RiskMetrics, RiskError> {
    let n = samples.len();
    if n == 0 {
        return Err(RiskError::EmptySample);
    }

    let mut sorted = samples.to_vec();
    sorted.par_sort_unstable_by(|a, b| a.total_cmp(b));

    let k = (config.tail_probability() * n as f64).floor() as usize;
    if k >= n {
        return Err(RiskError::TailIndexOutOfBounds { index: k, len: n });
    }

    let var = sorted[k];
    let cvar = sorted[..=k].iter().sum::<f64>() / (k + 1) as f64;
    let mean = total / n as f64;

    debug!(n, k, var, cvar, mean, "risk metrics computed");

    Ok(RiskMetrics {
        mean,
        var,
        cvar,
        confidence: config.confidence(),
    })
}

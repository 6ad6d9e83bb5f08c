//! GBM terminal-PnL path simulator.
//!
//! Iterates the discretised geometric Brownian motion in log space:
//!
//! ```text
//! S(t+dt) = S(t) * exp((mu - 0.5*sigma^2)*dt + sigma*sqrt(dt)*Z)
//! ```
//!
//! The exponential form keeps the price strictly positive for any draw,
//! which the naive Euler discretisation does not guarantee.

use crate::rng::WorkerRng;
use sim_core::SimulationParams;

/// Simulates one path and returns its terminal PnL, `S_final - S0`.
///
/// Pure function of its random draws: with a freshly seeded generator
/// the result is reproducible bit for bit. One standard-normal variate
/// is consumed per step.
#[inline]
pub fn simulate_terminal_pnl(params: &SimulationParams, rng: &mut WorkerRng) -> f64 {
    let dt = params.dt();
    let drift = (params.mu() - 0.5 * params.sigma() * params.sigma()) * dt;
    let vol_sqrt_dt = params.sigma() * dt.sqrt();

    let mut s = params.s0();
    for _ in 0..params.n_steps() {
        let z = rng.gen_normal();
        s *= (drift + vol_sqrt_dt * z).exp();
    }
    s - params.s0()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// With zero volatility the path is deterministic:
    /// `PnL = S0 * (exp(mu * T) - 1)` independent of the draws.
    #[test]
    fn zero_volatility_is_deterministic() {
        let params = SimulationParams::builder()
            .s0(100.0)
            .mu(0.05)
            .sigma(0.0)
            .horizon(1.0)
            .n_steps(252)
            .build()
            .unwrap();
        let mut rng = WorkerRng::from_seed(1);

        let pnl = simulate_terminal_pnl(&params, &mut rng);
        let expected = 100.0 * ((0.05f64).exp() - 1.0);
        assert_relative_eq!(pnl, expected, max_relative = 1e-12);
    }

    /// The same seed yields the same terminal PnL.
    #[test]
    fn reproducible_for_fixed_seed() {
        let params = SimulationParams::default();
        let mut rng1 = WorkerRng::from_seed(99);
        let mut rng2 = WorkerRng::from_seed(99);

        assert_eq!(
            simulate_terminal_pnl(&params, &mut rng1),
            simulate_terminal_pnl(&params, &mut rng2),
        );
    }

    /// Each path consumes exactly `n_steps` draws, so two consecutive
    /// paths from one generator match two paths from separate
    /// generators seeded to the same points.
    #[test]
    fn consumes_one_draw_per_step() {
        let params = SimulationParams::builder().n_steps(10).build().unwrap();

        let mut joint = WorkerRng::from_seed(5);
        let first = simulate_terminal_pnl(&params, &mut joint);
        let second = simulate_terminal_pnl(&params, &mut joint);
        assert_ne!(first, second);

        // Replaying from the same seed reproduces both in order.
        let mut replay = WorkerRng::from_seed(5);
        assert_eq!(first, simulate_terminal_pnl(&params, &mut replay));
        assert_eq!(second, simulate_terminal_pnl(&params, &mut replay));
    }

    /// Under this parametrisation `E[S_T] = S0 * exp(mu * T)`; with
    /// `mu = 0` the expected PnL is zero. Statistical check with a
    /// generous tolerance.
    #[test]
    fn driftless_mean_pnl_near_zero() {
        let params = SimulationParams::builder()
            .mu(0.0)
            .sigma(0.2)
            .horizon(1.0 / 252.0)
            .n_steps(10)
            .build()
            .unwrap();
        let mut rng = WorkerRng::from_seed(2024);

        let n = 100_000;
        let mut sum = 0.0;
        for _ in 0..n {
            sum += simulate_terminal_pnl(&params, &mut rng);
        }
        let mean = sum / n as f64;

        // Std of terminal PnL ~ S0*sigma*sqrt(T) ~ 1.26, so the
        // standard error of the mean is ~0.004.
        assert!(mean.abs() < 0.05, "mean PnL {} too far from 0", mean);
    }
}

//! Worker unit: one batch of path simulations.
//!
//! A worker owns its generator (seeded from the engine base seed and
//! its own identity) and never shares it. It produces a local PnL
//! sequence and the running sum of that sequence; the engine decides
//! where the sequence lands (a caller-owned buffer slice during a
//! parallel run, or a fresh allocation for standalone use).

use crate::error::EngineError;
use crate::path::simulate_terminal_pnl;
use crate::rng::WorkerRng;
use sim_core::SimulationParams;

/// PnL samples produced by one worker, plus their sum.
///
/// The sum is accumulated in path order, so it is bit-identical to a
/// sequential left fold over `pnls`.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkerOutput {
    /// Terminal PnL of each simulated path, in generation order.
    pub pnls: Vec<f64>,
    /// Sum of `pnls`.
    pub sum: f64,
}

/// Fills `slot` with one terminal PnL per path and returns their sum.
///
/// `slot.len()` is the worker's path count. Used by the engine, which
/// hands each worker a disjoint slice of the shared sample buffer.
pub(crate) fn fill_slot(
    params: &SimulationParams,
    worker_id: usize,
    base_seed: u64,
    slot: &mut [f64],
) -> f64 {
    let mut rng = WorkerRng::for_worker(base_seed, worker_id);
    let mut sum = 0.0;
    for out in slot.iter_mut() {
        let pnl = simulate_terminal_pnl(params, &mut rng);
        sum += pnl;
        *out = pnl;
    }
    sum
}

/// Runs one worker batch into freshly allocated local storage.
///
/// # Errors
///
/// Returns [`EngineError::Allocation`] if the local PnL buffer cannot
/// be reserved. Resource exhaustion is fatal for the batch; there is no
/// retry path.
pub fn run_worker(
    params: &SimulationParams,
    worker_id: usize,
    n_paths: usize,
    base_seed: u64,
) -> Result<WorkerOutput, EngineError> {
    let mut pnls: Vec<f64> = Vec::new();
    pnls.try_reserve_exact(n_paths)
        .map_err(|_| EngineError::Allocation { requested: n_paths })?;
    pnls.resize(n_paths, 0.0);

    let sum = fill_slot(params, worker_id, base_seed, &mut pnls);
    Ok(WorkerOutput { pnls, sum })
}

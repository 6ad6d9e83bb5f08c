//! Parallel aggregation engine.
//!
//! [`SimulationEngine`] partitions a fixed total path count evenly over
//! a fixed number of workers, runs them on scoped OS threads, and
//! releases the aggregated result only after every worker has joined.
//!
//! # Shared-Resource Discipline
//!
//! - The sample collection is pre-sized once and split into disjoint
//!   per-worker slices with `chunks_mut`; each worker writes only its
//!   own slice, so no locking is needed and no append race can occur.
//! - The global PnL total is an `AtomicU64` over the f64 bit pattern,
//!   updated with a compare-exchange retry loop. The
//!   reduction is commutative and associative up to floating-point
//!   rounding, so the final value does not depend on commit order.
//! - The scoped-thread join is the completion barrier: no reader can
//!   observe the collection or the total before every worker finished.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use tracing::{debug, info};

use crate::error::EngineError;
use crate::worker;
use sim_core::SimulationParams;

/// Lock-free f64 accumulator.
///
/// `fetch_add` retries a weak compare-exchange until the addition
/// commits against concurrent writers; a plain read-then-write would
/// lose updates.
struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    fn fetch_add(&self, delta: f64) {
        let mut current = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self
                .bits
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }

    fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}

/// Engine configuration: degree of parallelism and per-worker load.
///
/// Both counts are fixed for a run, not auto-tuned. Construct through
/// [`EngineConfig::builder()`].
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `n_workers` | 4 | Concurrent worker threads |
/// | `paths_per_worker` | 250 000 | Paths simulated by each worker |
/// | `base_seed` | 42 | Seed mixed with each worker id |
///
/// # Examples
///
/// ```rust
/// use sim_engine::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .n_workers(8)
///     .paths_per_worker(10_000)
///     .base_seed(7)
///     .build()
///     .unwrap();
/// assert_eq!(config.total_paths().unwrap(), 80_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    n_workers: usize,
    paths_per_worker: usize,
    base_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            n_workers: 4,
            paths_per_worker: 250_000,
            base_seed: 42,
        }
    }
}

impl EngineConfig {
    /// Creates a new builder with default values.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Number of concurrent workers.
    #[inline]
    pub fn n_workers(&self) -> usize {
        self.n_workers
    }

    /// Paths simulated by each worker.
    #[inline]
    pub fn paths_per_worker(&self) -> usize {
        self.paths_per_worker
    }

    /// Base seed; each worker derives its own generator from this and
    /// its identity.
    #[inline]
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Total path count across all workers.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PathCountOverflow`] if the product does
    /// not fit in a usize.
    pub fn total_paths(&self) -> Result<usize, EngineError> {
        self.n_workers
            .checked_mul(self.paths_per_worker)
            .ok_or(EngineError::PathCountOverflow {
                n_workers: self.n_workers,
                paths_per_worker: self.paths_per_worker,
            })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.n_workers == 0 {
            return Err(EngineError::InvalidConfig(
                "n_workers must be at least 1".to_string(),
            ));
        }
        if self.paths_per_worker == 0 {
            return Err(EngineError::InvalidConfig(
                "paths_per_worker must be at least 1".to_string(),
            ));
        }
        self.total_paths()?;
        Ok(())
    }
}

/// Builder for [`EngineConfig`].
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Sets the number of concurrent workers.
    pub fn n_workers(mut self, n_workers: usize) -> Self {
        self.config.n_workers = n_workers;
        self
    }

    /// Sets the paths simulated by each worker.
    pub fn paths_per_worker(mut self, paths_per_worker: usize) -> Self {
        self.config.paths_per_worker = paths_per_worker;
        self
    }

    /// Sets the base seed.
    pub fn base_seed(mut self, base_seed: u64) -> Self {
        self.config.base_seed = base_seed;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<EngineConfig, EngineError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Finalised result of a parallel run.
///
/// Only constructed after the join barrier, so the collection is
/// complete and read-only: `samples().len()` equals
/// `n_workers * paths_per_worker`, and `total()` is the atomically
/// reduced sum of every sample.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedPnl {
    samples: Vec<f64>,
    total: f64,
}

impl AggregatedPnl {
    /// All terminal PnL samples, grouped by worker slot.
    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Global PnL total committed by the workers.
    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Parallel Monte Carlo aggregation engine.
///
/// # Examples
///
/// ```rust
/// use sim_core::SimulationParams;
/// use sim_engine::{EngineConfig, SimulationEngine};
///
/// let config = EngineConfig::builder()
///     .n_workers(2)
///     .paths_per_worker(1_000)
///     .build()
///     .unwrap();
/// let engine = SimulationEngine::new(config);
///
/// let params = SimulationParams::default();
/// let pnl = engine.run(&params).unwrap();
/// assert_eq!(pnl.len(), 2_000);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationEngine {
    config: EngineConfig,
}

impl SimulationEngine {
    /// Creates an engine from a validated configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs the full batch and returns the aggregated result.
    ///
    /// Spawns one scoped OS thread per worker. Each worker fills a
    /// disjoint slice of the pre-sized sample buffer and commits its
    /// partial sum to the atomic total; the scope exit joins every
    /// worker before the result is assembled.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidConfig`] / [`EngineError::Params`] on
    ///   invalid inputs
    /// - [`EngineError::Allocation`] if the sample buffer cannot be
    ///   reserved for the configured path volume
    pub fn run(&self, params: &SimulationParams) -> Result<AggregatedPnl, EngineError> {
        self.config.validate()?;
        params.validate().map_err(EngineError::Params)?;

        let total_paths = self.config.total_paths()?;
        let mut samples: Vec<f64> = Vec::new();
        samples
            .try_reserve_exact(total_paths)
            .map_err(|_| EngineError::Allocation {
                requested: total_paths,
            })?;
        samples.resize(total_paths, 0.0);

        info!(
            n_workers = self.config.n_workers,
            paths_per_worker = self.config.paths_per_worker,
            total_paths,
            "starting parallel simulation"
        );

        let total = AtomicF64::new(0.0);
        let base_seed = self.config.base_seed;

        thread::scope(|scope| {
            for (worker_id, slot) in samples
                .chunks_mut(self.config.paths_per_worker)
                .enumerate()
            {
                let total = &total;
                scope.spawn(move || {
                    let sum = worker::fill_slot(params, worker_id, base_seed, slot);
                    total.fetch_add(sum);
                    debug!(worker_id, sum, "worker committed");
                });
            }
        });

        // All workers have joined; the collection is final.
        let total = total.load();
        info!(total, "simulation complete");

        Ok(AggregatedPnl { samples, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::run_worker;

    fn small_config(n_workers: usize, paths_per_worker: usize) -> EngineConfig {
        EngineConfig::builder()
            .n_workers(n_workers)
            .paths_per_worker(paths_per_worker)
            .base_seed(42)
            .build()
            .unwrap()
    }

    #[test]
    fn rejects_zero_workers() {
        let err = EngineConfig::builder().n_workers(0).build().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_zero_paths() {
        let err = EngineConfig::builder()
            .paths_per_worker(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_path_count_overflow() {
        let config = EngineConfig::builder()
            .n_workers(usize::MAX)
            .paths_per_worker(2);
        let err = config.build().unwrap_err();
        assert!(matches!(err, EngineError::PathCountOverflow { .. }));
    }

    /// Completeness invariant: the collection holds exactly
    /// `n_workers * paths_per_worker` samples.
    #[test]
    fn collection_is_complete() {
        let params = SimulationParams::default();
        let pnl = SimulationEngine::new(small_config(3, 1_000))
            .run(&params)
            .unwrap();
        assert_eq!(pnl.len(), 3_000);
    }

    /// Sum invariant: the atomic total equals the sum of every sample,
    /// within floating-point tolerance, for any worker count.
    #[test]
    fn total_matches_sample_sum() {
        let params = SimulationParams::default();
        for n_workers in [1, 2, 4, 7] {
            let pnl = SimulationEngine::new(small_config(n_workers, 2_000))
                .run(&params)
                .unwrap();

            let recomputed: f64 = pnl.samples().iter().sum();
            let rel = (pnl.total() - recomputed).abs() / recomputed.abs().max(1.0);
            assert!(
                rel < 1e-9,
                "relative error {} with {} workers",
                rel,
                n_workers
            );
        }
    }

    /// Each worker's slot in the shared buffer is bit-identical to the
    /// standalone worker output for the same identity.
    #[test]
    fn slots_match_standalone_workers() {
        let params = SimulationParams::default();
        let config = small_config(4, 500);
        let pnl = SimulationEngine::new(config).run(&params).unwrap();

        for worker_id in 0..4 {
            let standalone = run_worker(&params, worker_id, 500, config.base_seed()).unwrap();
            let slot = &pnl.samples()[worker_id * 500..(worker_id + 1) * 500];
            assert_eq!(slot, standalone.pnls.as_slice());
        }
    }

    /// Repeated runs with an identical configuration reproduce the
    /// whole collection bit for bit.
    #[test]
    fn run_is_reproducible_for_fixed_partition() {
        let params = SimulationParams::default();
        let engine = SimulationEngine::new(small_config(4, 250));

        let a = engine.run(&params).unwrap();
        let b = engine.run(&params).unwrap();
        assert_eq!(a, b);
    }

    /// Scaling property: doubling workers while halving the per-worker
    /// load leaves the collection size unchanged, and the mean stays
    /// within sampling noise.
    #[test]
    fn scaling_preserves_size_and_mean() {
        let params = SimulationParams::default();

        let wide = SimulationEngine::new(small_config(8, 5_000))
            .run(&params)
            .unwrap();
        let narrow = SimulationEngine::new(small_config(4, 10_000))
            .run(&params)
            .unwrap();

        assert_eq!(wide.len(), narrow.len());

        let mean_wide = wide.total() / wide.len() as f64;
        let mean_narrow = narrow.total() / narrow.len() as f64;
        assert!(
            (mean_wide - mean_narrow).abs() < 0.05,
            "means diverged: {} vs {}",
            mean_wide,
            mean_narrow
        );
    }

    /// The CAS retry loop loses no update under concurrent writers.
    #[test]
    fn atomic_total_is_race_free() {
        let total = AtomicF64::new(0.0);
        let threads = 8;
        let adds_per_thread = 10_000;

        thread::scope(|scope| {
            for _ in 0..threads {
                let total = &total;
                scope.spawn(move || {
                    for _ in 0..adds_per_thread {
                        total.fetch_add(1.5);
                    }
                });
            }
        });

        // 1.5 is exactly representable, so the result is exact
        // regardless of commit order.
        assert_eq!(total.load(), 1.5 * (threads * adds_per_thread) as f64);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(16))]

            /// Completeness and the sum invariant hold for arbitrary
            /// small partitions.
            #[test]
            fn invariants_hold_for_any_partition(
                n_workers in 1usize..6,
                paths_per_worker in 1usize..400,
                base_seed in any::<u64>(),
            ) {
                let params = SimulationParams::default();
                let config = EngineConfig::builder()
                    .n_workers(n_workers)
                    .paths_per_worker(paths_per_worker)
                    .base_seed(base_seed)
                    .build()
                    .unwrap();
                let pnl = SimulationEngine::new(config).run(&params).unwrap();

                prop_assert_eq!(pnl.len(), n_workers * paths_per_worker);

                let recomputed: f64 = pnl.samples().iter().sum();
                let rel = (pnl.total() - recomputed).abs()
                    / recomputed.abs().max(1.0);
                prop_assert!(rel < 1e-9);
            }
        }
    }
}

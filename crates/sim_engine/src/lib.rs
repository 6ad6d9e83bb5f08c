//! # Sim Engine (Kernel Layer)
//!
//! Parallel Monte Carlo path generation and aggregation.
//!
//! This crate provides:
//! - Deterministic per-worker random number generation ([`rng::WorkerRng`])
//! - The GBM terminal-PnL path simulator ([`path::simulate_terminal_pnl`])
//! - Worker batch execution ([`worker`])
//! - The parallel aggregation engine ([`engine::SimulationEngine`])
//!
//! ## Concurrency Discipline
//!
//! Two shared resources exist during a run, each with its own discipline:
//! the global PnL total is a lock-free atomic accumulator updated with a
//! compare-exchange retry loop, and the sample collection is a pre-sized
//! buffer partitioned into disjoint per-worker slices. Neither requires a
//! runtime lock; the scoped-thread join is the only barrier.

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod path;
pub mod rng;
pub mod worker;

pub use engine::{AggregatedPnl, EngineConfig, SimulationEngine};
pub use error::EngineError;
pub use rng::WorkerRng;
pub use worker::WorkerOutput;

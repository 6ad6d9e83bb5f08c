//! # Sim Risk (Risk Layer)
//!
//! Tail-risk metrics over a finalised PnL distribution.
//!
//! This crate consumes the sample collection and global total produced
//! by the engine layer and derives mean PnL, Value-at-Risk and
//! Conditional Value-at-Risk at a configurable confidence level. It is
//! pure computation: no concurrency beyond a private parallel sort, no
//! mutation of its input.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod metrics;

pub use metrics::{compute_risk_metrics, RiskConfig, RiskError, RiskMetrics};

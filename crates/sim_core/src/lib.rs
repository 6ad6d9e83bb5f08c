//! # sim_core: Foundation Layer for the Varsim Monte Carlo Engine
//!
//! This crate is the bottom layer of the workspace, providing:
//! - Validated GBM simulation parameters (`params::SimulationParams`)
//! - Configuration error types (`params::ParamsError`)
//!
//! ## Zero Dependency Principle
//!
//! The foundation layer has no dependencies on sibling crates and a
//! minimal external footprint (thiserror only). Every other layer
//! receives parameters by reference; nothing here is a process-wide
//! global or a compile-time constant.
//!
//! ## Usage Example
//!
//! ```rust
//! use sim_core::params::SimulationParams;
//!
//! let params = SimulationParams::builder()
//!     .s0(100.0)
//!     .mu(0.05)
//!     .sigma(0.2)
//!     .horizon(1.0 / 252.0)
//!     .n_steps(10)
//!     .build()
//!     .unwrap();
//!
//! assert!(params.dt() > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod params;

pub use params::{ParamsError, SimulationParams};

//! Varsim CLI - Parallel Monte Carlo VaR Simulation
//!
//! Runs one fixed-size batch simulation and prints wall-clock timing
//! followed by a tail-risk report. Every flag defaults to the
//! historical fixed-constant configuration, so a bare `varsim`
//! invocation reproduces the canonical run: 4 workers, 250 000 paths
//! each, S0 = 100, mu = 0.05, sigma = 0.2, a one-trading-day horizon
//! in 10 steps, 95% confidence.
//!
//! # Architecture
//!
//! As the service layer of the workspace, this crate only wires the
//! foundation (sim_core), kernel (sim_engine) and risk (sim_risk)
//! layers together and formats the console report.

use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sim_core::SimulationParams;
use sim_engine::{AggregatedPnl, EngineConfig, SimulationEngine};
use sim_risk::{compute_risk_metrics, RiskConfig, RiskMetrics};

mod error;

pub use error::{CliError, Result};

/// Parallel Monte Carlo VaR simulator
#[derive(Parser)]
#[command(name = "varsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of worker threads (0 = one per logical core)
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Paths simulated by each worker
    #[arg(long, default_value_t = 250_000)]
    paths_per_thread: usize,

    /// Initial price S0
    #[arg(long, default_value_t = 100.0)]
    spot: f64,

    /// Annualised drift
    #[arg(long, default_value_t = 0.05)]
    drift: f64,

    /// Annualised volatility
    #[arg(long, default_value_t = 0.2)]
    vol: f64,

    /// Horizon in years
    #[arg(long, default_value_t = 1.0 / 252.0)]
    horizon: f64,

    /// Discretisation steps over the horizon
    #[arg(long, default_value_t = 10)]
    steps: usize,

    /// Base RNG seed; each worker derives its own generator from this
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Tail probability for VaR/CVaR (0.05 = 95% confidence)
    #[arg(long, default_value_t = 0.05)]
    tail: f64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let params = SimulationParams::builder()
        .s0(cli.spot)
        .mu(cli.drift)
        .sigma(cli.vol)
        .horizon(cli.horizon)
        .n_steps(cli.steps)
        .build()?;

    let n_workers = if cli.threads == 0 {
        num_cpus::get()
    } else {
        cli.threads
    };
    let config = EngineConfig::builder()
        .n_workers(n_workers)
        .paths_per_worker(cli.paths_per_thread)
        .base_seed(cli.seed)
        .build()?;
    let engine = SimulationEngine::new(config);

    let start = Instant::now();
    let pnl = engine.run(&params)?;
    let elapsed_us = start.elapsed().as_micros() as f64;

    println!("Execution Time: {} seconds", elapsed_us / 1e6);
    println!(
        "Latency per path: {} microseconds",
        elapsed_us / pnl.len() as f64
    );

    let risk_config = RiskConfig::new(cli.tail)?;
    let metrics = compute_risk_metrics(pnl.samples(), pnl.total(), &risk_config)?;
    print_report(&metrics, &pnl, n_workers);

    Ok(())
}

/// Prints the risk report block in the historical console format.
fn print_report(metrics: &RiskMetrics, pnl: &AggregatedPnl, n_workers: usize) {
    let confidence_pct = metrics.confidence * 100.0;

    println!();
    println!(
        "=== Risk Metrics ({} Paths, {} Threads) ===",
        pnl.len(),
        n_workers
    );
    println!("Mean PnL: ${}", metrics.mean);
    println!("{}% VaR: ${}", confidence_pct, metrics.var);
    println!("{}% CVaR: ${}", confidence_pct, metrics.cvar);
}

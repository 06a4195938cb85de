//! Command-line parsing for the least-squares comparison lab.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numerical code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "lsq", version, about = "Least-Squares QR Method Comparison Lab")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the polynomial test problem, solve it with every strategy, and
    /// print the comparison (plus optional exports).
    Compare(CompareArgs),
    /// Factor the test matrix with each QR routine and report factorization
    /// quality (reconstruction, orthogonality, triangularity, pivots).
    Check(CheckArgs),
}

/// Options for the comparison run.
#[derive(Debug, Parser, Clone)]
pub struct CompareArgs {
    /// Sample points (rows of the design matrix).
    #[arg(short = 'm', long, default_value_t = 100)]
    pub rows: usize,

    /// Polynomial coefficients (columns of the design matrix).
    #[arg(short = 'n', long, default_value_t = 15)]
    pub cols: usize,

    /// Standard deviation of Gaussian noise added to the right-hand side
    /// (0 disables noise).
    #[arg(long, default_value_t = 0.0)]
    pub noise_sigma: f64,

    /// Random seed for noise generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of independent noisy trials to aggregate (needs
    /// --noise-sigma > 0 when > 1).
    #[arg(long, default_value_t = 1)]
    pub trials: usize,

    /// Householder output shape: "full" or "reduced".
    #[arg(long, default_value = "reduced")]
    pub mode: String,

    /// Fail fast when a factorization pivot is ~0 instead of propagating
    /// NaNs.
    #[arg(long)]
    pub strict: bool,

    /// Export per-strategy results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full run report to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for the factorization check.
#[derive(Debug, Parser, Clone)]
pub struct CheckArgs {
    /// Sample points (rows of the design matrix).
    #[arg(short = 'm', long, default_value_t = 100)]
    pub rows: usize,

    /// Polynomial coefficients (columns of the design matrix).
    #[arg(short = 'n', long, default_value_t = 15)]
    pub cols: usize,
}

//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during comparison runs
//! - exported to JSON/CSV
//! - reloaded later for downstream analysis

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::math::QrMode;

/// Configuration for a `compare` run.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Rows of the design matrix (sample points).
    pub rows: usize,
    /// Columns of the design matrix (polynomial coefficients).
    pub cols: usize,
    /// Standard deviation of Gaussian noise added to the right-hand side
    /// (0 disables noise).
    pub noise_sigma: f64,
    /// Seed for noise generation.
    pub seed: u64,
    /// Number of independent noisy trials to aggregate.
    pub trials: usize,
    /// Output shape used by the Householder strategy.
    pub mode: QrMode,
    /// Fail fast on ~0 pivots instead of propagating NaNs.
    pub strict: bool,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// Configuration for a `check` run.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub rows: usize,
    pub cols: usize,
}

/// Least-squares solve strategies compared by the driver.
///
/// The `library-*`, `normal-eq`, and `svd` entries lean on nalgebra's dense
/// factorizations; `householder` and `mgs` are this crate's own routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    LibraryQr,
    LibraryQrAugmented,
    Householder,
    Mgs,
    MgsAugmented,
    NormalEquations,
    Svd,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 7] = [
        StrategyKind::LibraryQr,
        StrategyKind::LibraryQrAugmented,
        StrategyKind::Householder,
        StrategyKind::Mgs,
        StrategyKind::MgsAugmented,
        StrategyKind::NormalEquations,
        StrategyKind::Svd,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            StrategyKind::LibraryQr => "library qr",
            StrategyKind::LibraryQrAugmented => "library qr (augmented)",
            StrategyKind::Householder => "householder",
            StrategyKind::Mgs => "modified gs",
            StrategyKind::MgsAugmented => "modified gs (augmented)",
            StrategyKind::NormalEquations => "normal equations",
            StrategyKind::Svd => "svd",
        }
    }
}

/// Result of a single strategy on a single problem.
///
/// The canonical right-hand side is scaled so the exact fit's last
/// coefficient is 1; `coeff_err` is `x_last - 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveOutcome {
    pub strategy: StrategyKind,
    pub x_last: f64,
    pub coeff_err: f64,
    pub residual_norm: f64,
}

/// A strategy that failed on a problem, with the failure reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedStrategy {
    pub strategy: StrategyKind,
    pub reason: String,
}

/// Per-strategy accuracy aggregated over independent noisy trials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyStats {
    pub strategy: StrategyKind,
    pub trials: usize,
    pub failures: usize,
    pub mean_abs_err: f64,
    pub max_abs_err: f64,
    pub mean_residual: f64,
}

/// Conditioning and sensitivity diagnostics of the least-squares problem.
///
/// - `kappa`: condition number of A (ratio of extreme singular values)
/// - `theta`: angle between b and the column space of A
/// - `eta`: sensitivity of the solution to perturbations in b
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProblemDiagnostics {
    pub kappa: f64,
    pub theta: f64,
    pub eta: f64,
}

/// Factorization methods exercised by the `check` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FactorMethod {
    Mgs,
    HouseholderFull,
    HouseholderReduced,
    LibraryQr,
}

impl FactorMethod {
    pub const ALL: [FactorMethod; 4] = [
        FactorMethod::Mgs,
        FactorMethod::HouseholderFull,
        FactorMethod::HouseholderReduced,
        FactorMethod::LibraryQr,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            FactorMethod::Mgs => "modified gs",
            FactorMethod::HouseholderFull => "householder (full)",
            FactorMethod::HouseholderReduced => "householder (reduced)",
            FactorMethod::LibraryQr => "library qr",
        }
    }
}

/// Quality metrics of a computed factorization A ≈ QR.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FactorQuality {
    /// ‖A − QR‖ / ‖A‖ (Frobenius).
    pub recon_rel_err: f64,
    /// ‖QᵀQ − I‖ (Frobenius).
    pub orth_err: f64,
    /// Largest |R[i][j]| strictly below the diagonal.
    pub max_strict_lower: f64,
    /// Smallest |R[i][i]|; ~0 signals (near) rank deficiency.
    pub min_diag: f64,
    /// Largest |R[i][i]|, the scale `min_diag` is judged against.
    pub max_diag: f64,
}

/// One row of the `check` report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorReport {
    pub method: FactorMethod,
    pub q_shape: (usize, usize),
    pub r_shape: (usize, usize),
    pub quality: FactorQuality,
}

/// The portable JSON representation of a full `compare` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub tool: String,
    pub rows: usize,
    pub cols: usize,
    pub noise_sigma: f64,
    pub seed: u64,
    pub trials: usize,
    pub mode: String,
    pub strict: bool,
    pub diagnostics: ProblemDiagnostics,
    pub outcomes: Vec<SolveOutcome>,
    pub skipped: Vec<SkippedStrategy>,
    pub stats: Option<Vec<StrategyStats>>,
}

//! Problem conditioning diagnostics and factorization quality metrics.

use nalgebra::{DMatrix, DVector};

use crate::domain::{FactorQuality, ProblemDiagnostics};
use crate::error::AppError;

/// Relative pivot threshold below which a factorization is flagged as near
/// rank deficient.
const RANK_WARN_RATIO: f64 = 1e-12;

/// Conditioning and sensitivity of min ‖Ax − b‖.
///
/// Uses the SVD least-squares solution x and its fit y = Ax:
/// κ = σ_max/σ_min, θ = asin(‖b − y‖/‖b‖), η = σ_max·‖x‖/‖y‖.
pub fn problem_diagnostics(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
) -> Result<ProblemDiagnostics, AppError> {
    let n = a.ncols();
    if a.nrows() == 0 || n == 0 {
        return Err(AppError::new(2, "Diagnostics need a non-empty matrix."));
    }

    let svd = a.clone().svd(true, true);
    let s_max = svd.singular_values.max();
    let s_min = svd.singular_values.min();
    if !(s_max.is_finite() && s_min > 0.0) {
        return Err(AppError::new(
            4,
            "Singular values are degenerate; cannot compute diagnostics.",
        ));
    }

    let u = svd
        .u
        .as_ref()
        .ok_or_else(|| AppError::new(4, "SVD did not produce U."))?;
    let v_t = svd
        .v_t
        .as_ref()
        .ok_or_else(|| AppError::new(4, "SVD did not produce V^T."))?;

    let utb = u.transpose() * b;
    let mut scaled = DVector::<f64>::zeros(n);
    for i in 0..n {
        scaled[i] = utb[i] / svd.singular_values[i];
    }
    let x = v_t.transpose() * scaled;
    let y = a * &x;

    let b_norm = b.norm();
    let y_norm = y.norm();
    if b_norm == 0.0 || y_norm == 0.0 {
        return Err(AppError::new(2, "Diagnostics need a nonzero right-hand side."));
    }

    // The ratio can drift past 1 by a few ulps when b is (nearly) in the
    // column space.
    let ratio = ((b - &y).norm() / b_norm).clamp(-1.0, 1.0);

    Ok(ProblemDiagnostics {
        kappa: s_max / s_min,
        theta: ratio.asin(),
        eta: s_max * x.norm() / y_norm,
    })
}

/// Quality metrics for a computed factorization A ≈ QR.
pub fn factor_quality(a: &DMatrix<f64>, q: &DMatrix<f64>, r: &DMatrix<f64>) -> FactorQuality {
    let k = q.ncols();
    let recon_rel_err = (a - q * r).norm() / a.norm();
    let qtq = q.transpose() * q;
    let orth_err = (&qtq - DMatrix::identity(k, k)).norm();

    let mut max_strict_lower = 0.0_f64;
    for j in 0..r.ncols() {
        for i in (j + 1)..r.nrows() {
            max_strict_lower = max_strict_lower.max(r[(i, j)].abs());
        }
    }

    let diag_len = r.nrows().min(r.ncols());
    let mut min_diag = f64::INFINITY;
    let mut max_diag = 0.0_f64;
    for i in 0..diag_len {
        let d = r[(i, i)].abs();
        min_diag = min_diag.min(d);
        max_diag = max_diag.max(d);
    }

    FactorQuality {
        recon_rel_err,
        orth_err,
        max_strict_lower,
        min_diag,
        max_diag,
    }
}

/// Whether the R diagonal signals a (near) rank-deficient input.
///
/// Written so that NaN pivots (the permissive-mode failure signature) also
/// trigger the warning.
pub fn near_rank_deficient(quality: &FactorQuality) -> bool {
    !(quality.min_diag > RANK_WARN_RATIO * quality.max_diag)
}

/// Default pivot tolerance for strict-mode factorization, scaled to the
/// input.
pub fn default_rank_tol(a: &DMatrix<f64>) -> f64 {
    let (m, n) = a.shape();
    f64::EPSILON * a.norm() * (m.max(n) as f64)
}

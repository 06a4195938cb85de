//! The individual least-squares solve strategies.
//!
//! Each strategy reduces min ‖Ax − b‖ to a small square solve:
//!
//! - the QR strategies solve `R x = Qᵀb` by back substitution
//! - the augmented variants factor `[A | b]` and read `Qᵀb` out of the last
//!   column of the augmented R, never forming `Qᵀ` explicitly
//! - normal equations solve `AᵀA x = Aᵀb` by Cholesky
//! - SVD applies the pseudo-inverse factor by factor
//!
//! The library-backed strategies (`library-qr`, `normal-eq`, `svd`) use
//! nalgebra and exist as accuracy baselines for `householder` and `mgs`.

use nalgebra::{DMatrix, DVector};

use crate::domain::StrategyKind;
use crate::error::AppError;
use crate::math::{QrMode, house, house_strict, mgs, mgs_strict};

/// Solve min ‖Ax − b‖ with the given strategy.
///
/// `mode` selects the Householder output shape; `rank_tol` switches the
/// in-crate factorizations to strict mode. A non-finite solution is reported
/// as an error rather than returned.
pub fn solve_with(
    strategy: StrategyKind,
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    mode: QrMode,
    rank_tol: Option<f64>,
) -> Result<DVector<f64>, AppError> {
    let x = match strategy {
        StrategyKind::LibraryQr => solve_library_qr(a, b)?,
        StrategyKind::LibraryQrAugmented => solve_library_qr_augmented(a, b)?,
        StrategyKind::Householder => solve_householder(a, b, mode, rank_tol)?,
        StrategyKind::Mgs => solve_mgs(a, b, rank_tol)?,
        StrategyKind::MgsAugmented => solve_mgs_augmented(a, b, rank_tol)?,
        StrategyKind::NormalEquations => solve_normal_equations(a, b)?,
        StrategyKind::Svd => solve_svd(a, b)?,
    };

    if !x.iter().all(|v| v.is_finite()) {
        return Err(AppError::new(
            4,
            format!("{} produced a non-finite solution.", strategy.display_name()),
        ));
    }
    Ok(x)
}

fn solve_upper(r: &DMatrix<f64>, rhs: &DVector<f64>) -> Result<DVector<f64>, AppError> {
    r.solve_upper_triangular(rhs)
        .ok_or_else(|| AppError::new(4, "Upper-triangular solve hit a zero pivot."))
}

/// `[A | b]` as a single m×(n+1) matrix.
fn augmented(a: &DMatrix<f64>, b: &DVector<f64>) -> DMatrix<f64> {
    let (m, n) = a.shape();
    let mut ab = DMatrix::<f64>::zeros(m, n + 1);
    ab.view_range_mut(0..m, 0..n).copy_from(a);
    ab.set_column(n, b);
    ab
}

fn solve_library_qr(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>, AppError> {
    let qr = a.clone().qr();
    let qtb = qr.q().transpose() * b;
    solve_upper(&qr.r(), &qtb)
}

fn solve_library_qr_augmented(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
) -> Result<DVector<f64>, AppError> {
    let n = a.ncols();
    let qr = augmented(a, b).qr();
    let r2 = qr.r();
    let rr = r2.view_range(0..n, 0..n).into_owned();
    let qb = r2.view_range(0..n, n..n + 1).column(0).into_owned();
    solve_upper(&rr, &qb)
}

fn solve_householder(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    mode: QrMode,
    rank_tol: Option<f64>,
) -> Result<DVector<f64>, AppError> {
    let n = a.ncols();
    let (q, r) = match rank_tol {
        Some(tol) => house_strict(a, mode, tol)?,
        None => house(a, mode)?,
    };
    let qtb = q.transpose() * b;
    // In full mode R carries m-n trailing ~0 rows; the solve only needs the
    // leading n×n block and the matching slice of Qᵀb.
    let rr = r.rows(0, n).into_owned();
    let qtb_top = qtb.rows(0, n).into_owned();
    solve_upper(&rr, &qtb_top)
}

fn solve_mgs(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    rank_tol: Option<f64>,
) -> Result<DVector<f64>, AppError> {
    let (q, r) = match rank_tol {
        Some(tol) => mgs_strict(a, tol)?,
        None => mgs(a)?,
    };
    let qtb = q.transpose() * b;
    solve_upper(&r, &qtb)
}

fn solve_mgs_augmented(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    rank_tol: Option<f64>,
) -> Result<DVector<f64>, AppError> {
    let n = a.ncols();
    let ab = augmented(a, b);
    let (_, r2) = match rank_tol {
        Some(tol) => mgs_strict(&ab, tol)?,
        None => mgs(&ab)?,
    };
    let rr = r2.view_range(0..n, 0..n).into_owned();
    let qb = r2.view_range(0..n, n..n + 1).column(0).into_owned();
    solve_upper(&rr, &qb)
}

fn solve_normal_equations(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>, AppError> {
    let ata = a.transpose() * a;
    let atb = a.transpose() * b;
    let chol = ata
        .cholesky()
        .ok_or_else(|| AppError::new(4, "Normal equations are not positive definite."))?;
    Ok(chol.solve(&atb))
}

fn solve_svd(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>, AppError> {
    let n = a.ncols();
    let svd = a.clone().svd(true, true);
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
    Ok(v_t.transpose() * scaled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::build_problem;

    /// Build a well-conditioned polynomial problem with a planted exact
    /// solution, so every strategy should recover it to high accuracy.
    fn planted_problem() -> (DMatrix<f64>, DVector<f64>, DVector<f64>) {
        let p = build_problem(30, 4, 0.0, 0).unwrap();
        let x_true = DVector::from_column_slice(&[1.0, -2.0, 0.5, 3.0]);
        let b = &p.a * &x_true;
        (p.a, b, x_true)
    }

    #[test]
    fn every_strategy_recovers_a_planted_solution() {
        let (a, b, x_true) = planted_problem();
        for strategy in StrategyKind::ALL {
            let x = solve_with(strategy, &a, &b, QrMode::Reduced, None).unwrap();
            let err = (&x - &x_true).norm();
            assert!(err < 1e-8, "{}: error {err}", strategy.display_name());
        }
    }

    #[test]
    fn householder_full_mode_solves_too() {
        let (a, b, x_true) = planted_problem();
        let x = solve_with(StrategyKind::Householder, &a, &b, QrMode::Full, None).unwrap();
        assert!((&x - &x_true).norm() < 1e-8);
    }

    #[test]
    fn strict_mode_passes_on_full_rank_input() {
        let (a, b, x_true) = planted_problem();
        for strategy in [StrategyKind::Householder, StrategyKind::Mgs, StrategyKind::MgsAugmented] {
            let x = solve_with(strategy, &a, &b, QrMode::Reduced, Some(1e-12)).unwrap();
            assert!((&x - &x_true).norm() < 1e-8);
        }
    }

    #[test]
    fn strict_mode_rejects_rank_deficient_input() {
        let a = DMatrix::from_column_slice(4, 2, &[1.0, 2.0, 3.0, 4.0, 2.0, 4.0, 6.0, 8.0]);
        let b = DVector::from_column_slice(&[1.0, 1.0, 1.0, 1.0]);
        for strategy in [StrategyKind::Householder, StrategyKind::Mgs] {
            let res = solve_with(strategy, &a, &b, QrMode::Reduced, Some(1e-10));
            assert!(res.is_err(), "{} should fail", strategy.display_name());
        }
    }
}

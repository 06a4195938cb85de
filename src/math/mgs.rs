//! Modified Gram-Schmidt orthogonalization.
//!
//! Factors a tall m×n matrix A (m ≥ n) as A = QR with Q m×n orthonormal and
//! R n×n upper triangular.
//!
//! Implementation choices:
//! - Each column is re-projected against the freshly computed Q column
//!   *before* the next column is normalized. This ordering is what separates
//!   the modified variant from classical Gram-Schmidt and must not be
//!   reordered.
//! - A full column-rank input is assumed. A zero column norm divides through
//!   and propagates NaN/Inf; use [`mgs_strict`] to fail fast instead.

use nalgebra::DMatrix;

use super::qr::QrError;

/// Factor `a` as Q (m×n) times R (n×n) via Modified Gram-Schmidt.
///
/// Fails fast with [`QrError::DimensionMismatch`] when `a` has fewer rows
/// than columns. Rank deficiency is not detected: R's diagonal holds the
/// column norms at elimination time, and a ~0 entry there means the result
/// is garbage.
pub fn mgs(a: &DMatrix<f64>) -> Result<(DMatrix<f64>, DMatrix<f64>), QrError> {
    mgs_impl(a, None)
}

/// [`mgs`] with an opt-in rank check: fails with [`QrError::RankDeficient`]
/// as soon as a diagonal entry of R falls at or below `rank_tol`.
pub fn mgs_strict(a: &DMatrix<f64>, rank_tol: f64) -> Result<(DMatrix<f64>, DMatrix<f64>), QrError> {
    mgs_impl(a, Some(rank_tol))
}

fn mgs_impl(
    a: &DMatrix<f64>,
    rank_tol: Option<f64>,
) -> Result<(DMatrix<f64>, DMatrix<f64>), QrError> {
    let (m, n) = a.shape();
    if m < n {
        return Err(QrError::DimensionMismatch { rows: m, cols: n });
    }

    let mut v = a.clone();
    let mut q = DMatrix::<f64>::zeros(m, n);
    let mut r = DMatrix::<f64>::zeros(n, n);

    for i in 0..n {
        let rii = v.column(i).norm();
        r[(i, i)] = rii;
        if let Some(tol) = rank_tol {
            if rii <= tol {
                return Err(QrError::RankDeficient { col: i });
            }
        }

        let qi = v.column(i) / rii;
        q.set_column(i, &qi);

        // Project the i-th direction out of every remaining column now,
        // before moving on.
        for j in (i + 1)..n {
            let rij = qi.dot(&v.column(j));
            r[(i, j)] = rij;
            v.column_mut(j).axpy(-rij, &qi, 1.0);
        }
    }

    Ok((q, r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;
    use rand::prelude::*;
    use rand::rngs::StdRng;

    fn random_tall(m: usize, n: usize, seed: u64) -> DMatrix<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        DMatrix::from_fn(m, n, |_, _| rng.gen_range(-1.0..=1.0))
    }

    #[test]
    fn shapes_match_contract() {
        let a = random_tall(12, 5, 1);
        let (q, r) = mgs(&a).unwrap();
        assert_eq!(q.shape(), (12, 5));
        assert_eq!(r.shape(), (5, 5));
    }

    #[test]
    fn reconstructs_and_orthogonalizes_random_input() {
        let a = random_tall(20, 8, 2);
        let (q, r) = mgs(&a).unwrap();

        let recon = (&a - &q * &r).norm() / a.norm();
        assert!(recon < 1e-10, "reconstruction error {recon}");

        let qtq = q.transpose() * &q;
        let orth = (&qtq - DMatrix::identity(8, 8)).norm();
        assert!(orth < 1e-10, "orthogonality error {orth}");
    }

    #[test]
    fn r_is_upper_triangular() {
        let a = random_tall(15, 6, 3);
        let (_, r) = mgs(&a).unwrap();
        for i in 0..6 {
            for j in 0..i {
                assert!(r[(i, j)].abs() < 1e-10);
            }
        }
    }

    #[test]
    fn orthonormal_input_passes_through() {
        // Columns are already orthonormal, so Q = A and R = I exactly
        // (up to floating point).
        let a = DMatrix::from_column_slice(3, 2, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        let (q, r) = mgs(&a).unwrap();

        assert!((&q - &a).norm() < 1e-12);
        assert!((&r - DMatrix::identity(2, 2)).norm() < 1e-12);
    }

    #[test]
    fn wide_input_is_rejected() {
        let a = DMatrix::<f64>::zeros(2, 3);
        let err = mgs(&a).unwrap_err();
        assert_eq!(err, QrError::DimensionMismatch { rows: 2, cols: 3 });
    }

    #[test]
    fn strict_mode_flags_dependent_columns() {
        // Second column is a multiple of the first; its norm collapses after
        // the first projection.
        let a = DMatrix::from_column_slice(4, 2, &[1.0, 2.0, 3.0, 4.0, 2.0, 4.0, 6.0, 8.0]);
        let err = mgs_strict(&a, 1e-10).unwrap_err();
        assert_eq!(err, QrError::RankDeficient { col: 1 });
    }
}

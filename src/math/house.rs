//! Householder QR triangularization with explicit Q recovery.
//!
//! Factors a tall m×n matrix A (m ≥ n) as A = QR by zeroing the subdiagonal
//! of each column with a reflection. Q is materialized afterwards by running
//! the stored reflections, newest first, over the columns of the m×m
//! identity; no intermediate m×m products are ever formed.
//!
//! The leading-entry sign uses `sign(0) = +1`, so the pivot of the k-th
//! reflected column comes out as `-sign(x[0])·‖x‖`.
//!
//! The n reflection vectors (ragged lengths m, m-1, ..., m-n+1) live back to
//! back in one contiguous buffer owned by the call.

use nalgebra::DMatrix;

use super::qr::{QrError, QrMode, sign};

/// Factor `a` via Householder reflections.
///
/// Returns (Q m×m, R m×n) for [`QrMode::Full`] and (Q m×n, R n×n) for
/// [`QrMode::Reduced`]. Fails fast with [`QrError::DimensionMismatch`] when
/// `a` has fewer rows than columns. A reflection vector that collapses to
/// zero (rank-deficient input) propagates NaN; see [`house_strict`].
pub fn house(a: &DMatrix<f64>, mode: QrMode) -> Result<(DMatrix<f64>, DMatrix<f64>), QrError> {
    house_impl(a, mode, None)
}

/// [`house`] with an opt-in rank check: fails with [`QrError::RankDeficient`]
/// when a reflection vector's norm falls at or below `rank_tol`.
pub fn house_strict(
    a: &DMatrix<f64>,
    mode: QrMode,
    rank_tol: f64,
) -> Result<(DMatrix<f64>, DMatrix<f64>), QrError> {
    house_impl(a, mode, Some(rank_tol))
}

fn house_impl(
    a: &DMatrix<f64>,
    mode: QrMode,
    rank_tol: Option<f64>,
) -> Result<(DMatrix<f64>, DMatrix<f64>), QrError> {
    let (m, n) = a.shape();
    if m < n {
        return Err(QrError::DimensionMismatch { rows: m, cols: n });
    }

    // The k-th reflection vector has length m-k and starts at this offset in
    // the shared buffer.
    let offset = |k: usize| k * (2 * m - k + 1) / 2;
    let mut vbuf = vec![0.0_f64; offset(n)];

    // Phase 1: triangularize a working copy, storing each unit reflection
    // vector for phase 2.
    let mut r = a.clone();
    for k in 0..n {
        let len = m - k;
        {
            let v = &mut vbuf[offset(k)..offset(k) + len];
            for (i, slot) in v.iter_mut().enumerate() {
                *slot = r[(k + i, k)];
            }
            let x_norm = slice_norm(v);
            v[0] += sign(v[0]) * x_norm;

            let vnorm = slice_norm(v);
            if let Some(tol) = rank_tol {
                if vnorm <= tol {
                    return Err(QrError::RankDeficient { col: k });
                }
            }
            for x in v.iter_mut() {
                *x /= vnorm;
            }
        }

        let v = &vbuf[offset(k)..offset(k) + len];
        for j in k..n {
            reflect_column(&mut r, k, j, v);
        }
    }

    // Phase 2: Q column by column, applying the reflections in reverse
    // order to the identity.
    let mut q = DMatrix::<f64>::identity(m, m);
    for i in 0..m {
        for k in (0..n).rev() {
            let v = &vbuf[offset(k)..offset(k) + (m - k)];
            reflect_column(&mut q, k, i, v);
        }
    }

    match mode {
        QrMode::Full => Ok((q, r)),
        QrMode::Reduced => Ok((q.columns(0, n).into_owned(), r.rows(0, n).into_owned())),
    }
}

fn slice_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Apply `x -= 2·v·(v·x)` to rows `k..` of column `j`, where `v` is a unit
/// vector of length `nrows - k`.
fn reflect_column(mat: &mut DMatrix<f64>, k: usize, j: usize, v: &[f64]) {
    let m = mat.nrows();
    let mut dot = 0.0;
    for i in k..m {
        dot += v[i - k] * mat[(i, j)];
    }
    let scale = 2.0 * dot;
    for i in k..m {
        mat[(i, j)] -= scale * v[i - k];
    }
}

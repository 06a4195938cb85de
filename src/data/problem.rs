//! Polynomial least-squares test problem.
//!
//! The design matrix samples the monomial basis on an even grid:
//! `A[i][j] = t_i^j` with `t = linspace(0, 1, m)`. The right-hand side is
//! `exp(sin(4t))`, rescaled so that the exact fit's highest-degree
//! coefficient equals 1. The columns of A become nearly collinear as the
//! degree grows, which is exactly what makes this a good stress test for the
//! solve strategies.

use nalgebra::{DMatrix, DVector};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::error::AppError;

/// Normalization constant for the canonical right-hand side.
/// Dividing `exp(sin(4t))` by this makes the highest-degree coefficient of
/// the exact least-squares fit equal to 1, so per-method accuracy is read
/// directly off `x_last - 1`.
pub const B_SCALE: f64 = 2006.787453080206;

/// A tall least-squares instance min ‖Ax − b‖.
#[derive(Debug, Clone)]
pub struct Problem {
    pub a: DMatrix<f64>,
    pub b: DVector<f64>,
}

/// Build the m×n polynomial test problem, optionally perturbing b with
/// zero-mean Gaussian noise (deterministic per seed).
pub fn build_problem(
    rows: usize,
    cols: usize,
    noise_sigma: f64,
    seed: u64,
) -> Result<Problem, AppError> {
    if cols == 0 {
        return Err(AppError::new(2, "Column count must be > 0."));
    }
    if rows < cols {
        return Err(AppError::new(
            2,
            format!("Need rows >= cols for a tall system (got {rows}x{cols})."),
        ));
    }
    if !(noise_sigma.is_finite() && noise_sigma >= 0.0) {
        return Err(AppError::new(2, "Noise sigma must be finite and >= 0."));
    }

    let t: Vec<f64> = (0..rows)
        .map(|i| {
            if rows == 1 {
                0.0
            } else {
                i as f64 / (rows as f64 - 1.0)
            }
        })
        .collect();

    let mut a = DMatrix::<f64>::zeros(rows, cols);
    for (i, &ti) in t.iter().enumerate() {
        let mut p = 1.0;
        for j in 0..cols {
            a[(i, j)] = p;
            p *= ti;
        }
    }

    let mut b = DVector::from_iterator(rows, t.iter().map(|&ti| (4.0 * ti).sin().exp() / B_SCALE));

    if noise_sigma > 0.0 {
        let mut rng = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
        for i in 0..rows {
            b[i] += noise_sigma * normal.sample(&mut rng);
        }
    }

    Ok(Problem { a, b })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_problem_has_expected_shape() {
        let p = build_problem(100, 15, 0.0, 0).unwrap();
        assert_eq!(p.a.shape(), (100, 15));
        assert_eq!(p.b.len(), 100);
        assert!(p.b.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn first_column_is_ones_and_last_row_is_ones() {
        let p = build_problem(10, 4, 0.0, 0).unwrap();
        for i in 0..10 {
            assert_eq!(p.a[(i, 0)], 1.0);
        }
        // t ends at exactly 1, so every power in the last row is 1.
        for j in 0..4 {
            assert!((p.a[(9, j)] - 1.0).abs() < 1e-15);
        }
    }

    #[test]
    fn noise_is_deterministic_per_seed() {
        let p1 = build_problem(20, 3, 0.1, 7).unwrap();
        let p2 = build_problem(20, 3, 0.1, 7).unwrap();
        let p3 = build_problem(20, 3, 0.1, 8).unwrap();
        assert_eq!(p1.b, p2.b);
        assert!((&p1.b - &p3.b).norm() > 0.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(build_problem(3, 0, 0.0, 0).is_err());
        assert!(build_problem(3, 5, 0.0, 0).is_err());
        assert!(build_problem(10, 3, -0.1, 0).is_err());
        assert!(build_problem(10, 3, f64::NAN, 0).is_err());
    }
}

//! Run every strategy on a problem and aggregate noisy trials.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::data::build_problem;
use crate::domain::{CompareConfig, SolveOutcome, StrategyKind, StrategyStats};
use crate::error::AppError;
use crate::math::QrMode;
use crate::solve::diagnostics::default_rank_tol;
use crate::solve::strategies::solve_with;

/// Comparison output for a single problem: one outcome per strategy that
/// solved, plus the strategies that failed and why.
#[derive(Debug, Clone)]
pub struct CompareOutcome {
    pub outcomes: Vec<SolveOutcome>,
    pub skipped: Vec<(StrategyKind, String)>,
}

/// Solve the problem with every strategy.
///
/// A failing strategy is recorded as skipped rather than aborting the whole
/// comparison; the remaining strategies still report.
pub fn compare_strategies(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    mode: QrMode,
    rank_tol: Option<f64>,
) -> CompareOutcome {
    let mut outcomes = Vec::with_capacity(StrategyKind::ALL.len());
    let mut skipped = Vec::new();

    for strategy in StrategyKind::ALL {
        match solve_with(strategy, a, b, mode, rank_tol) {
            Ok(x) => {
                let x_last = x[x.len() - 1];
                let residual_norm = (b - a * &x).norm();
                outcomes.push(SolveOutcome {
                    strategy,
                    x_last,
                    coeff_err: x_last - 1.0,
                    residual_norm,
                });
            }
            Err(e) => skipped.push((strategy, e.to_string())),
        }
    }

    CompareOutcome { outcomes, skipped }
}

/// Aggregate per-strategy accuracy over independent noisy trials (parallel).
///
/// Trial `t` perturbs the canonical right-hand side with seed `seed + t`, so
/// runs are reproducible regardless of thread scheduling.
pub fn run_trials(config: &CompareConfig) -> Result<Vec<StrategyStats>, AppError> {
    if config.trials < 2 {
        return Err(AppError::new(2, "Trial statistics need --trials >= 2."));
    }
    if config.noise_sigma <= 0.0 {
        return Err(AppError::new(2, "Trial statistics need --noise-sigma > 0."));
    }

    let per_trial: Vec<CompareOutcome> = (0..config.trials)
        .into_par_iter()
        .map(|trial| {
            let problem = build_problem(
                config.rows,
                config.cols,
                config.noise_sigma,
                config.seed.wrapping_add(trial as u64),
            )?;
            let rank_tol = config.strict.then(|| default_rank_tol(&problem.a));
            Ok(compare_strategies(&problem.a, &problem.b, config.mode, rank_tol))
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let mut stats = Vec::with_capacity(StrategyKind::ALL.len());
    for strategy in StrategyKind::ALL {
        let mut solved = 0usize;
        let mut failures = 0usize;
        let mut sum_abs = 0.0;
        let mut max_abs = 0.0_f64;
        let mut sum_residual = 0.0;

        for trial in &per_trial {
            match trial.outcomes.iter().find(|o| o.strategy == strategy) {
                Some(o) => {
                    solved += 1;
                    sum_abs += o.coeff_err.abs();
                    max_abs = max_abs.max(o.coeff_err.abs());
                    sum_residual += o.residual_norm;
                }
                None => failures += 1,
            }
        }

        let denom = solved.max(1) as f64;
        stats.push(StrategyStats {
            strategy,
            trials: config.trials,
            failures,
            mean_abs_err: sum_abs / denom,
            max_abs_err: max_abs,
            mean_residual: sum_residual / denom,
        });
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(trials: usize, noise_sigma: f64) -> CompareConfig {
        CompareConfig {
            rows: 40,
            cols: 5,
            noise_sigma,
            seed: 42,
            trials,
            mode: QrMode::Reduced,
            strict: false,
            export_csv: None,
            export_json: None,
        }
    }

    #[test]
    fn all_strategies_report_on_the_canonical_problem() {
        let problem = build_problem(100, 15, 0.0, 0).unwrap();
        let out = compare_strategies(&problem.a, &problem.b, QrMode::Reduced, None);

        assert_eq!(out.outcomes.len() + out.skipped.len(), StrategyKind::ALL.len());
        for o in &out.outcomes {
            assert!(o.x_last.is_finite());
            assert!(o.residual_norm.is_finite());
        }
    }

    #[test]
    fn qr_strategies_beat_normal_equations_on_the_canonical_problem() {
        let problem = build_problem(100, 15, 0.0, 0).unwrap();
        let out = compare_strategies(&problem.a, &problem.b, QrMode::Reduced, None);

        let err_of = |kind: StrategyKind| {
            out.outcomes
                .iter()
                .find(|o| o.strategy == kind)
                .map(|o| o.coeff_err.abs())
        };

        let qr_err = err_of(StrategyKind::LibraryQr).unwrap();
        // The library QR path recovers the scaled coefficient to a few
        // digits even at kappa ~ 1e10.
        assert!(qr_err < 1e-3, "library qr error {qr_err}");

        if let Some(ne_err) = err_of(StrategyKind::NormalEquations) {
            assert!(ne_err > qr_err, "normal equations ({ne_err}) should trail QR ({qr_err})");
        }
    }

    #[test]
    fn trials_aggregate_without_failures() {
        let stats = run_trials(&test_config(4, 1e-6)).unwrap();
        assert_eq!(stats.len(), StrategyKind::ALL.len());
        for s in &stats {
            assert_eq!(s.trials, 4);
            assert_eq!(s.failures, 0);
            assert!(s.mean_abs_err.is_finite());
            assert!(s.max_abs_err >= s.mean_abs_err || s.max_abs_err == 0.0);
        }
    }

    #[test]
    fn trials_require_noise() {
        assert!(run_trials(&test_config(4, 0.0)).is_err());
        assert!(run_trials(&test_config(1, 1e-6)).is_err());
    }
}

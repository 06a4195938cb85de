//! Shared pipeline logic used by the CLI subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! problem build -> diagnostics -> strategy comparison -> trial statistics
//!
//! The CLI can then focus on presentation (printing and exports).

use crate::data::build_problem;
use crate::domain::{
    CheckConfig, CompareConfig, FactorMethod, FactorReport, ProblemDiagnostics, StrategyStats,
};
use crate::error::AppError;
use crate::math::{QrMode, house, mgs};
use crate::solve::{
    CompareOutcome, compare_strategies, default_rank_tol, factor_quality, problem_diagnostics,
    run_trials,
};

/// All computed outputs of a single `lsq compare` run.
#[derive(Debug, Clone)]
pub struct CompareRun {
    pub diagnostics: ProblemDiagnostics,
    pub outcome: CompareOutcome,
    pub stats: Option<Vec<StrategyStats>>,
}

/// Execute the full comparison pipeline and return the computed outputs.
pub fn run_compare(config: &CompareConfig) -> Result<CompareRun, AppError> {
    let problem = build_problem(config.rows, config.cols, config.noise_sigma, config.seed)?;

    let diagnostics = problem_diagnostics(&problem.a, &problem.b)?;
    let rank_tol = config.strict.then(|| default_rank_tol(&problem.a));
    let outcome = compare_strategies(&problem.a, &problem.b, config.mode, rank_tol);

    let stats = if config.trials > 1 {
        Some(run_trials(config)?)
    } else {
        None
    };

    Ok(CompareRun {
        diagnostics,
        outcome,
        stats,
    })
}

/// Factor the test matrix with each method and collect quality metrics.
pub fn run_check(config: &CheckConfig) -> Result<Vec<FactorReport>, AppError> {
    let problem = build_problem(config.rows, config.cols, 0.0, 0)?;
    let a = &problem.a;

    let mut reports = Vec::with_capacity(FactorMethod::ALL.len());
    for method in FactorMethod::ALL {
        let (q, r) = match method {
            FactorMethod::Mgs => mgs(a)?,
            FactorMethod::HouseholderFull => house(a, QrMode::Full)?,
            FactorMethod::HouseholderReduced => house(a, QrMode::Reduced)?,
            FactorMethod::LibraryQr => {
                let qr = a.clone().qr();
                (qr.q(), qr.r())
            }
        };
        let quality = factor_quality(a, &q, &r);
        reports.push(FactorReport {
            method,
            q_shape: q.shape(),
            r_shape: r.shape(),
            quality,
        });
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_pipeline_runs_on_the_canonical_problem() {
        let config = CompareConfig {
            rows: 100,
            cols: 15,
            noise_sigma: 0.0,
            seed: 42,
            trials: 1,
            mode: QrMode::Reduced,
            strict: false,
            export_csv: None,
            export_json: None,
        };
        let run = run_compare(&config).unwrap();

        assert!(run.diagnostics.kappa > 1.0);
        assert!(!run.outcome.outcomes.is_empty());
        assert!(run.stats.is_none());
    }

    #[test]
    fn check_pipeline_reports_every_method() {
        let config = CheckConfig { rows: 50, cols: 8 };
        let reports = run_check(&config).unwrap();

        assert_eq!(reports.len(), FactorMethod::ALL.len());
        for r in &reports {
            assert!(r.quality.recon_rel_err < 1e-10, "{}", r.method.display_name());
            assert!(r.quality.max_strict_lower < 1e-10);
        }

        let full = reports
            .iter()
            .find(|r| r.method == FactorMethod::HouseholderFull)
            .unwrap();
        assert_eq!(full.q_shape, (50, 50));
        assert_eq!(full.r_shape, (50, 8));

        let reduced = reports
            .iter()
            .find(|r| r.method == FactorMethod::HouseholderReduced)
            .unwrap();
        assert_eq!(reduced.q_shape, (50, 8));
        assert_eq!(reduced.r_shape, (8, 8));
    }
}

//! Formatted terminal output for `compare` and `check` runs.
//!
//! We keep formatting code in one place so:
//! - the math/solve code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{
    CheckConfig, CompareConfig, FactorReport, ProblemDiagnostics, StrategyStats,
};
use crate::solve::{CompareOutcome, near_rank_deficient};

/// Format the `compare` run summary: problem header, conditioning
/// diagnostics, and the per-strategy table.
pub fn format_compare_summary(
    config: &CompareConfig,
    diag: &ProblemDiagnostics,
    outcome: &CompareOutcome,
) -> String {
    let mut out = String::new();

    out.push_str("=== lsq - Least-Squares Method Comparison ===\n");
    out.push_str(&format!(
        "Problem: m={} n={} (polynomial basis on t in [0, 1])\n",
        config.rows, config.cols
    ));
    if config.noise_sigma > 0.0 {
        out.push_str(&format!(
            "Noise: sigma={:.3e} seed={}\n",
            config.noise_sigma, config.seed
        ));
    }
    out.push_str(&format!(
        "Householder mode: {} | strict: {}\n",
        config.mode.display_name(),
        config.strict
    ));

    out.push('\n');
    out.push_str(&format!("kappa = {:>10.4e}\n", diag.kappa));
    out.push_str(&format!("theta = {:>10.4e}\n", diag.theta));
    out.push_str(&format!("eta   = {:>10.4e}\n", diag.eta));

    out.push_str("\nPer-strategy solutions (exact last coefficient is 1):\n");
    out.push_str(&format!(
        "{:<24} {:>18} {:>12} {:>12}\n",
        "strategy", "x_last", "x_last-1", "||Ax-b||"
    ));
    out.push_str(&format!(
        "{:-<24} {:-<18} {:-<12} {:-<12}\n",
        "", "", "", ""
    ));
    for o in &outcome.outcomes {
        out.push_str(&format!(
            "{:<24} {:>18.12} {:>12.3e} {:>12.3e}\n",
            o.strategy.display_name(),
            o.x_last,
            o.coeff_err,
            o.residual_norm
        ));
    }
    for (strategy, reason) in &outcome.skipped {
        out.push_str(&format!("  (skipped {}) {reason}\n", strategy.display_name()));
    }

    out
}

/// Format per-strategy statistics aggregated over noisy trials.
pub fn format_trial_stats(stats: &[StrategyStats]) -> String {
    let mut out = String::new();

    out.push_str("Trial statistics (|x_last - 1| across noisy trials):\n");
    out.push_str(&format!(
        "{:<24} {:>7} {:>9} {:>12} {:>12} {:>12}\n",
        "strategy", "trials", "failures", "mean", "max", "mean ||r||"
    ));
    out.push_str(&format!(
        "{:-<24} {:-<7} {:-<9} {:-<12} {:-<12} {:-<12}\n",
        "", "", "", "", "", ""
    ));
    for s in stats {
        out.push_str(&format!(
            "{:<24} {:>7} {:>9} {:>12.3e} {:>12.3e} {:>12.3e}\n",
            s.strategy.display_name(),
            s.trials,
            s.failures,
            s.mean_abs_err,
            s.max_abs_err,
            s.mean_residual
        ));
    }

    out
}

/// Format the `check` summary: factorization quality per method.
pub fn format_check_summary(config: &CheckConfig, reports: &[FactorReport]) -> String {
    let mut out = String::new();

    out.push_str("=== lsq - QR Factorization Check ===\n");
    out.push_str(&format!(
        "Problem matrix: m={} n={} (polynomial basis on t in [0, 1])\n\n",
        config.rows, config.cols
    ));

    out.push_str(&format!(
        "{:<24} {:>9} {:>9} {:>12} {:>12} {:>12} {:>12}\n",
        "method", "Q", "R", "||A-QR||/A", "||QtQ-I||", "max lower", "min |Rii|"
    ));
    out.push_str(&format!(
        "{:-<24} {:-<9} {:-<9} {:-<12} {:-<12} {:-<12} {:-<12}\n",
        "", "", "", "", "", "", ""
    ));
    for r in reports {
        out.push_str(&format!(
            "{:<24} {:>9} {:>9} {:>12.3e} {:>12.3e} {:>12.3e} {:>12.3e}\n",
            r.method.display_name(),
            format!("{}x{}", r.q_shape.0, r.q_shape.1),
            format!("{}x{}", r.r_shape.0, r.r_shape.1),
            r.quality.recon_rel_err,
            r.quality.orth_err,
            r.quality.max_strict_lower,
            r.quality.min_diag
        ));
    }

    for r in reports {
        if near_rank_deficient(&r.quality) {
            out.push_str(&format!(
                "  (warning) {}: R diagonal has a ~0 pivot (min |Rii| = {:.3e}); \
                 the input is near rank deficient\n",
                r.method.display_name(),
                r.quality.min_diag
            ));
        }
    }

    out
}

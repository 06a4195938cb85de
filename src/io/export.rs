//! Export comparison results to CSV / JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON carries the full run (config, diagnostics, outcomes,
//! trial statistics) as defined by `domain::RunReport`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{RunReport, SolveOutcome};
use crate::error::AppError;

/// Write per-strategy results to a CSV file.
pub fn write_results_csv(path: &Path, outcomes: &[SolveOutcome]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "strategy,x_last,coeff_err,residual_norm")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for o in outcomes {
        writeln!(
            file,
            "{},{:.16e},{:.16e},{:.16e}",
            o.strategy.display_name(),
            o.x_last,
            o.coeff_err,
            o.residual_norm
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the full run report to a JSON file.
pub fn write_report_json(path: &Path, report: &RunReport) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create report JSON '{}': {e}", path.display()),
        )
    })?;

    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

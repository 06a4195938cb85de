//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the test problem and runs the requested pipeline
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{CheckArgs, Command, CompareArgs};
use crate::domain::{CheckConfig, CompareConfig, RunReport, SkippedStrategy};
use crate::error::AppError;
use crate::math::QrMode;

pub mod pipeline;

/// Entry point for the `lsq` binary.
pub fn run() -> Result<(), AppError> {
    // `lsq` and `lsq -n 8` should behave like `lsq compare ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Compare(args) => handle_compare(args),
        Command::Check(args) => handle_check(args),
    }
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let config = compare_config_from_args(&args)?;
    let run = pipeline::run_compare(&config)?;

    println!(
        "{}",
        crate::report::format_compare_summary(&config, &run.diagnostics, &run.outcome)
    );
    if let Some(stats) = &run.stats {
        println!("{}", crate::report::format_trial_stats(stats));
    }

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::export::write_results_csv(path, &run.outcome.outcomes)?;
    }
    if let Some(path) = &config.export_json {
        let report = RunReport {
            tool: "lsq".to_string(),
            rows: config.rows,
            cols: config.cols,
            noise_sigma: config.noise_sigma,
            seed: config.seed,
            trials: config.trials,
            mode: config.mode.display_name().to_string(),
            strict: config.strict,
            diagnostics: run.diagnostics,
            outcomes: run.outcome.outcomes.clone(),
            skipped: run
                .outcome
                .skipped
                .iter()
                .map(|(strategy, reason)| SkippedStrategy {
                    strategy: *strategy,
                    reason: reason.clone(),
                })
                .collect(),
            stats: run.stats.clone(),
        };
        crate::io::export::write_report_json(path, &report)?;
    }

    Ok(())
}

fn handle_check(args: CheckArgs) -> Result<(), AppError> {
    let config = CheckConfig {
        rows: args.rows,
        cols: args.cols,
    };
    let reports = pipeline::run_check(&config)?;
    println!("{}", crate::report::format_check_summary(&config, &reports));
    Ok(())
}

/// Translate CLI arguments into a validated run configuration.
///
/// The mode string parses here so an unknown mode surfaces as a proper
/// error before any computation starts.
pub fn compare_config_from_args(args: &CompareArgs) -> Result<CompareConfig, AppError> {
    let mode: QrMode = args.mode.parse()?;
    Ok(CompareConfig {
        rows: args.rows,
        cols: args.cols,
        noise_sigma: args.noise_sigma,
        seed: args.seed,
        trials: args.trials,
        mode,
        strict: args.strict,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    })
}

/// Rewrite argv so `lsq` defaults to `lsq compare`.
///
/// Rules:
/// - `lsq`                     -> `lsq compare`
/// - `lsq -n 8 ...`            -> `lsq compare -n 8 ...`
/// - `lsq --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("compare".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "compare" | "check");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "compare flags".
    if arg1.starts_with('-') {
        argv.insert(1, "compare".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with_mode(mode: &str) -> CompareArgs {
        CompareArgs {
            rows: 100,
            cols: 15,
            noise_sigma: 0.0,
            seed: 42,
            trials: 1,
            mode: mode.to_string(),
            strict: false,
            export: None,
            export_json: None,
        }
    }

    #[test]
    fn unknown_mode_is_rejected_at_the_config_seam() {
        let err = compare_config_from_args(&args_with_mode("bogus")).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let config = compare_config_from_args(&args_with_mode("full")).unwrap();
        assert_eq!(config.mode, QrMode::Full);
    }

    #[test]
    fn bare_invocation_defaults_to_compare() {
        let argv = rewrite_args(vec!["lsq".to_string()]);
        assert_eq!(argv, vec!["lsq".to_string(), "compare".to_string()]);

        let argv = rewrite_args(vec!["lsq".to_string(), "--strict".to_string()]);
        assert_eq!(
            argv,
            vec!["lsq".to_string(), "compare".to_string(), "--strict".to_string()]
        );

        let argv = rewrite_args(vec!["lsq".to_string(), "check".to_string()]);
        assert_eq!(argv, vec!["lsq".to_string(), "check".to_string()]);
    }
}

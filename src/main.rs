//! modcmp - Component manifest comparison CLI tool
//!
//! Compares the components installed on two sides (client and server by
//! default) and reports version drift.

use anyhow::anyhow;
use clap::Parser;
use modcmp::cli::CliArgs;
use modcmp::comparator::Comparator;
use modcmp::config::{Settings, DEFAULT_ERROR_LOG};
use modcmp::diagnostics::ErrorReport;
use modcmp::error::AppError;
use modcmp::output::{create_formatter, write_report, OutputConfig};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit code for failures that are not an `AppError`
const EXIT_UNEXPECTED: u8 = 1;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("modcmp=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("modcmp=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => return usage_error(e),
    };
    init_tracing(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    tracing::debug!("modcmp v{} starting", env!("CARGO_PKG_VERSION"));

    let settings = match Settings::from_cli(&args) {
        Ok(settings) => settings,
        Err(e) => {
            let error = anyhow::Error::new(AppError::from(e));
            let mut report = ErrorReport::capture(&error);
            if let Some(left) = &args.left {
                report = report.with_context("left", left.display().to_string());
            }
            if let Some(right) = &args.right {
                report = report.with_context("right", right.display().to_string());
            }
            let log_path = args
                .error_log
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ERROR_LOG));
            return fail(&error, report, &log_path);
        }
    };

    match run(&args, settings.clone()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let report = ErrorReport::capture(&e).with_settings(&settings);
            fail(&e, report, &settings.error_log)
        }
    }
}

/// Main application logic
async fn run(args: &CliArgs, settings: Settings) -> anyhow::Result<()> {
    let comparator = Comparator::new(settings);
    let report = comparator.run_with_progress(args.show_progress()).await?;

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet, args.no_color);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    write_report(formatter.as_ref(), &report, &mut stdout)
        .map_err(|e| anyhow!("failed to write report: {}", e))?;

    Ok(())
}

/// Report a command line clap could not parse
///
/// `--help` and `--version` also arrive here and exit successfully.
fn usage_error(error: clap::Error) -> ExitCode {
    let _ = error.print();
    if !error.use_stderr() {
        return ExitCode::SUCCESS;
    }

    let rendered = error.to_string();
    let message = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string();
    let error = anyhow::Error::new(AppError::Usage(message));
    write_error_log(ErrorReport::capture(&error), Path::new(DEFAULT_ERROR_LOG));
    ExitCode::from(exit_code_for(&error))
}

fn fail(error: &anyhow::Error, report: ErrorReport, log_path: &Path) -> ExitCode {
    eprintln!("Error: {}", error);
    write_error_log(report, log_path);
    ExitCode::from(exit_code_for(error))
}

fn exit_code_for(error: &anyhow::Error) -> u8 {
    error
        .downcast_ref::<AppError>()
        .map(AppError::exit_code)
        .unwrap_or(EXIT_UNEXPECTED)
}

fn write_error_log(mut report: ErrorReport, path: &Path) {
    if let Ok(cwd) = std::env::current_dir() {
        report = report.with_context("cwd", cwd.display().to_string());
    }

    match report.write_to(path) {
        Ok(()) => eprintln!("Details written to {}", path.display()),
        Err(e) => tracing::warn!("could not write error log {}: {}", path.display(), e),
    }
}

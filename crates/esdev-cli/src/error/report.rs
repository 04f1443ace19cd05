//! Miette diagnostic conversion for CLI errors.

use crate::error::{BuildError, CliError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => build_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert BuildError to miette Report
fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::Failed { status, stderr } => miette::miette!(
            help = "Fix the errors reported above and run the build again",
            "esbuild failed ({})\n{}",
            status,
            stderr.trim_end()
        ),
        _ => miette::miette!("{}", err),
    }
}

//! `esdev build`: clean, bundle, write index.html, exit.

use crate::cli::BuildArgs;
use crate::commands::{check_entries, project_root, report_build, runner_for};
use crate::config::{EsdevConfig, load_dotenv};
use crate::error::Result;
use crate::ui;

/// Execute the build command.
///
/// # Errors
///
/// Configuration problems, a missing entry point and esbuild failures are
/// returned. A problem writing index.html is only reported.
pub async fn execute(args: BuildArgs) -> Result<()> {
    load_dotenv(&project_root(args.project.cwd.as_deref()));

    let config = EsdevConfig::load(&args.project)?;
    config.validate()?;
    check_entries(&config)?;

    ui::info(&format!(
        "Building {} ({} mode)",
        config.entry.join(", "),
        config.mode
    ));

    let result = runner_for(&config).run().await?;
    report_build(&result, &config);
    Ok(())
}

//! Status lines printed to stderr.
//!
//! These are for the person watching the terminal; machine-readable detail
//! goes through `tracing`.

use owo_colors::{OwoColorize, Stream::Stderr, Style};

/// Print a success line, e.g. after a build finished.
///
/// ```no_run
/// esdev_cli::ui::success("Build completed in 120ms");
/// ```
pub fn success(message: &str) {
    eprintln!(
        "{} {}",
        "✓".if_supports_color(Stderr, |t| t.style(Style::new().green().bold())),
        message
    );
}

/// Print an informational line.
pub fn info(message: &str) {
    eprintln!(
        "{} {}",
        "ℹ".if_supports_color(Stderr, |t| t.style(Style::new().blue().bold())),
        message
    );
}

/// Print a warning for something that did not stop the build.
///
/// ```no_run
/// esdev_cli::ui::warning("Could not clear build/: permission denied");
/// ```
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        "⚠".if_supports_color(Stderr, |t| t.style(Style::new().yellow().bold())),
        message.if_supports_color(Stderr, |t| t.yellow())
    );
}

/// Print an error line.
pub fn error(message: &str) {
    eprintln!(
        "{} {}",
        "✗".if_supports_color(Stderr, |t| t.style(Style::new().red().bold())),
        message.if_supports_color(Stderr, |t| t.red())
    );
}

/// Print a rebuild line with the event that caused it.
pub fn rebuild(trigger: &str) {
    eprintln!(
        "{} {} {}",
        "↻".if_supports_color(Stderr, |t| t.style(Style::new().cyan().bold())),
        "Re-build...".if_supports_color(Stderr, |t| t.bold()),
        trigger.if_supports_color(Stderr, |t| t.dimmed())
    );
}

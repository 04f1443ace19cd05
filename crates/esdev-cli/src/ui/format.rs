//! Formatting utilities for sizes, durations, and output listings.

use console::Term;
use owo_colors::{OwoColorize, Stream::Stderr, Style};
use std::path::Path;
use std::time::Duration;

/// Format file size in human-readable format.
///
/// # Examples
///
/// ```
/// use esdev_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format duration in human-readable format.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use esdev_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    }
}

/// Print the files a build emitted, with their sizes when readable.
///
/// Paths are printed as esbuild reported them, relative to `cwd` when they
/// are not absolute.
pub fn print_outputs(outputs: &[String], cwd: &Path) {
    let term = Term::stderr();
    let width = (term.size().1 as usize).min(80);

    eprintln!(
        "\n{}",
        "Out files".if_supports_color(Stderr, |t| t.style(Style::new().bold().underline()))
    );
    eprintln!("{}", "─".repeat(width));

    for output in outputs {
        let size = std::fs::metadata(cwd.join(output))
            .map(|meta| format_size(meta.len()))
            .unwrap_or_else(|_| "?".to_string());

        eprintln!(
            "  {} {} {}",
            "▸".if_supports_color(Stderr, |t| t.blue()),
            output.if_supports_color(Stderr, |t| t.style(Style::new().bright_white().bold())),
            size.if_supports_color(Stderr, |t| t.dimmed())
        );
    }

    eprintln!("{}", "─".repeat(width));
}

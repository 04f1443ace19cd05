//! Terminal output helpers.
//!
//! Status lines, durations and the list of emitted files. Colors go through
//! `owo-colors`, terminal detection through `console`.

mod format;
mod messages;

pub use format::{format_duration, format_size, print_outputs};
pub use messages::{error, info, rebuild, success, warning};

/// Check if color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise stderr must be a terminal.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Apply the color decision to stderr output.
///
/// Should be called once, early in `main`. `--no-color` always wins.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    owo_colors::set_override(enabled);
    tracing::debug!(enabled, "terminal colors");
}

//! Logging infrastructure for the esdev CLI.
//!
//! Structured logging on top of `tracing`:
//!
//! - `--verbose` enables debug output for the esdev crates
//! - `--quiet` keeps errors only
//! - otherwise `RUST_LOG` is honored, falling back to info
//!
//! # Example
//!
//! ```rust,no_run
//! use esdev_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("Starting build");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "esdev=debug,esdev_cli=debug,esdev_html=debug";
const QUIET_FILTER: &str = "esdev=error,esdev_cli=error,esdev_html=error";
const DEFAULT_FILTER: &str = "esdev=info,esdev_cli=info,esdev_html=info";

/// Build the filter for the given verbosity flags.
///
/// `verbose` wins over `quiet`; clap rejects the combination anyway.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once at startup, before any logging occurs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second initialization (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}

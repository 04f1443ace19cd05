//! esdev - esbuild front end with a live-reload development server.
//!
//! This crate drives the `esbuild` executable and wraps every build with two
//! plugins: one clears the output directory before the build, the other
//! writes an `index.html` referencing the emitted scripts and stylesheets.
//! The `dev` command adds a file watcher and an HTTP server that pushes a
//! refresh event to open browser tabs after each successful rebuild.
//!
//! # Architecture
//!
//! - [`cli`] - clap definitions for `esdev build` and `esdev dev`
//! - [`config`] - layered configuration (defaults, file, `.env`, env, flags)
//! - [`bundler`] - the [`bundler::Bundler`] seam and the esbuild driver
//! - [`plugins`] - build lifecycle hooks (clean, index.html)
//! - [`runner`] - serializes builds and runs plugin hooks around them
//! - [`dev`] - refresh notifier, SSE server and file watcher
//! - [`error`] - error types with actionable messages
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - terminal status lines
//!
//! # Example
//!
//! ```rust
//! use esdev_cli::dev::RefreshNotifier;
//!
//! let notifier = RefreshNotifier::new();
//! let _tab = notifier.subscribe();
//! assert_eq!(notifier.publish(), 1);
//! ```

pub mod bundler;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dev;
pub mod error;
pub mod logger;
pub mod plugins;
pub mod runner;
pub mod ui;

pub use error::{BuildError, CliError, ConfigError, Result, ResultExt};

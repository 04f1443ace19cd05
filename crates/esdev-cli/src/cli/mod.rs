//! Command-line interface definition for esdev.
//!
//! # Command Structure
//!
//! - `esdev build` - clean, bundle and write index.html once
//! - `esdev dev` - the same, then serve, watch and live-reload

mod commands;
pub mod enums;
mod tests;

use clap::Parser;

pub use commands::{BuildArgs, Command, DevArgs, ProjectArgs};
pub use enums::*;

/// esdev - esbuild with index.html generation and live reload
#[derive(Parser, Debug)]
#[command(
    name = "esdev",
    version,
    about = "esbuild with index.html generation and live reload",
    long_about = "esdev runs esbuild, clears the output directory before each build and\n\
                  writes an index.html that loads the emitted scripts and stylesheets.\n\
                  `esdev dev` adds a server that reloads open tabs after every rebuild."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

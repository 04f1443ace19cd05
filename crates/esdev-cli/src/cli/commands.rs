use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;

/// Available esdev subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build once
    ///
    /// Clears the output directory, runs esbuild and writes index.html
    /// referencing the emitted scripts and stylesheets.
    Build(BuildArgs),

    /// Start the development server with watch mode
    ///
    /// Builds, serves the output directory, rebuilds when sources change and
    /// tells open browser tabs to reload after every successful rebuild.
    Dev(DevArgs),
}

/// Options shared by `build` and `dev`.
///
/// Anything left unset falls back to environment variables, then
/// esdev.config.json, then built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Entry points to bundle
    ///
    /// Examples:
    ///   esdev build src/index.tsx
    ///   esdev build src/main.tsx src/worker.ts
    #[arg(value_name = "ENTRY")]
    pub entry: Vec<String>,

    /// Output directory, cleared before every build
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Build mode (development or production)
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Document title written into index.html
    #[arg(short, long, value_name = "TITLE")]
    pub title: Option<String>,

    /// HTML template used for index.html
    #[arg(long, value_name = "FILE", conflicts_with = "no_template")]
    pub template: Option<PathBuf>,

    /// Ignore any configured template and use the built-in page
    #[arg(long)]
    pub no_template: bool,

    /// Path to the esbuild executable
    #[arg(long, value_name = "PATH")]
    pub esbuild: Option<PathBuf>,

    /// Config file (defaults to esdev.config.json in the working directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Working directory; relative paths resolve against it
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the build command
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Arguments for the dev command
#[derive(Args, Debug, Clone, Default)]
pub struct DevArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Port for the development server (also used by the live-reload snippet)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Host name the live-reload snippet connects to
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Open the browser once the server is up
    #[arg(long)]
    pub open: bool,
}

//! The bundler seam.
//!
//! Builds go through the [`Bundler`] trait so the runner and the dev loop can
//! be exercised without an esbuild binary. [`EsbuildBundler`] is the real
//! implementation.

mod esbuild;

pub use esbuild::{EsbuildBundler, Metafile};

use crate::config::{EsdevConfig, Mode};
use crate::error::BuildError;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of a successful build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildResult {
    /// Output paths in the order the bundler reported them. `None` when the
    /// bundler produced no output listing.
    pub outputs: Option<Vec<String>>,
    /// Wall-clock time spent in the bundler
    pub duration: Duration,
    /// Number of warnings the bundler printed
    pub warnings: usize,
}

impl BuildResult {
    pub fn outputs(&self) -> &[String] {
        self.outputs.as_deref().unwrap_or_default()
    }
}

/// Something that can produce a bundle.
#[async_trait]
pub trait Bundler: Send + Sync {
    /// Run one build to completion.
    async fn build(&self) -> Result<BuildResult, BuildError>;
}

/// Options handed to the bundler, derived from [`EsdevConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct BundleOptions {
    pub program: PathBuf,
    pub cwd: PathBuf,
    pub entries: Vec<String>,
    pub out_dir: PathBuf,
    pub mode: Mode,
    pub tsconfig: Option<PathBuf>,
    pub loaders: IndexMap<String, String>,
}

impl BundleOptions {
    pub fn from_config(config: &EsdevConfig) -> Self {
        Self {
            program: config.esbuild.clone(),
            cwd: config.root(),
            entries: config.entry.clone(),
            out_dir: config.out_dir.clone(),
            mode: config.mode,
            tsconfig: config.tsconfig.clone(),
            loaders: config.loaders.clone(),
        }
    }
}

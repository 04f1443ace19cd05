//! Configuration system for esdev with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and a config file.
//! Priority: CLI > Environment > File > Defaults
//!
//! The environment layer understands the plain `TITLE`, `MODE` and `PORT`
//! variables as well as `ESDEV_`-prefixed ones. A `.env` file in the working
//! directory is loaded into the process environment first (see
//! [`load_dotenv`]); variables that are already set win.

mod defaults;
mod loading;
mod validation;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use crate::cli::Mode;
pub use defaults::*;
pub use loading::{CONFIG_FILE_NAME, load_dotenv};

/// esdev configuration - loaded from esdev.config.json, the environment and CLI args.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EsdevConfig {
    /// Entry points to bundle (e.g., ["src/index.tsx"])
    pub entry: Vec<String>,

    /// Output directory, removed at the start of every build
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Directory watched by the dev server
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    /// HTML template for index.html; the built-in page is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    /// Document title
    #[serde(default = "default_title")]
    pub title: String,

    /// Build mode
    #[serde(default)]
    pub mode: Mode,

    /// Host name the live-reload snippet connects to
    #[serde(default = "default_host")]
    pub host: String,

    /// Dev server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// esbuild executable
    #[serde(default = "default_esbuild")]
    pub esbuild: PathBuf,

    /// tsconfig.json passed to esbuild
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsconfig: Option<PathBuf>,

    /// esbuild loaders keyed by extension (e.g. ".png": "file")
    #[serde(default = "default_loaders")]
    pub loaders: IndexMap<String, String>,

    /// Debounce delay for file change events, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Extra patterns ignored by the watcher
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub watch_ignore: Vec<String>,

    /// Working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl EsdevConfig {
    /// Working directory all relative paths resolve against.
    pub fn root(&self) -> PathBuf {
        self.cwd.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve `path` against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root().join(path)
        }
    }

    pub fn out_dir_path(&self) -> PathBuf {
        self.resolve(&self.out_dir)
    }

    pub fn source_root_path(&self) -> PathBuf {
        self.resolve(&self.source_root)
    }

    pub fn template_path(&self) -> Option<PathBuf> {
        self.template.as_deref().map(|path| self.resolve(path))
    }
}

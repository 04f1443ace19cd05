use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Build mode, selected with `--mode` or the `MODE` environment variable
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Readable output for local work
    ///
    /// Hashed entry names (`bundle.[name]-[hash]`), source maps, no
    /// minification, and the live-reload snippet in templated pages.
    #[value(name = "development")]
    Development,

    /// Optimized output for deployment
    ///
    /// A single `bundle.js`/`bundle.css` pair, minified, without source maps
    /// or live reload in templated pages.
    #[default]
    #[value(name = "production")]
    Production,
}

impl Mode {
    pub fn is_dev(self) -> bool {
        self == Mode::Development
    }

    /// esbuild `--entry-names` pattern for this mode.
    pub fn entry_names(self) -> &'static str {
        match self {
            Mode::Development => "[dir]/bundle.[name]-[hash]",
            Mode::Production => "bundle",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Mode::Development => "development",
            Mode::Production => "production",
        })
    }
}

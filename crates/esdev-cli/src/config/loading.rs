use crate::cli::{DevArgs, Mode, ProjectArgs};
use crate::config::{EsdevConfig, defaults::*};
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "esdev.config.json";

/// Template picked up automatically when present.
const CONVENTIONAL_TEMPLATE: &str = "public/index.html";

/// Unprefixed variables understood for compatibility with existing `.env` files.
const PLAIN_ENV_KEYS: &[&str] = &["TITLE", "MODE", "PORT"];

/// Prefix for esdev-specific variables.
const ENV_PREFIX: &str = "ESDEV_";

/// Keys accepted with the `ESDEV_` prefix (after the prefix is stripped).
const PREFIXED_ENV_KEYS: &[&str] = &[
    "title", "mode", "port", "host", "esbuild", "template", "tsconfig",
];

/// Command-line values. Unset flags are skipped so lower layers show through.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<Mode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    esbuild: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cwd: Option<PathBuf>,
}

impl CliOverrides {
    fn from_project(args: &ProjectArgs) -> Self {
        Self {
            entry: (!args.entry.is_empty()).then(|| args.entry.clone()),
            out_dir: args.out_dir.clone(),
            mode: args.mode,
            title: args.title.clone(),
            template: args.template.clone(),
            esbuild: args.esbuild.clone(),
            cwd: args.cwd.clone(),
            ..Self::default()
        }
    }
}

/// Only the mode differs between the `build` and `dev` baselines.
#[derive(Serialize)]
struct ModeDefault {
    mode: Mode,
}

impl EsdevConfig {
    /// Load configuration for `esdev build`.
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load(args: &ProjectArgs) -> Result<Self> {
        Self::load_layers(args, CliOverrides::from_project(args), Mode::Production)
    }

    /// Load configuration for `esdev dev`.
    ///
    /// Identical to [`EsdevConfig::load`] except that the default mode is
    /// development; an explicit mode from any layer still wins.
    pub fn load_for_dev(args: &DevArgs) -> Result<Self> {
        let overrides = CliOverrides {
            host: args.host.clone(),
            port: args.port,
            ..CliOverrides::from_project(&args.project)
        };
        Self::load_layers(&args.project, overrides, Mode::Development)
    }

    fn load_layers(args: &ProjectArgs, overrides: CliOverrides, default_mode: Mode) -> Result<Self> {
        let root = args.cwd.clone().unwrap_or_else(|| PathBuf::from("."));

        let mut defaults = Self::default_config();
        if root.join(CONVENTIONAL_TEMPLATE).is_file() {
            defaults.template = default_template();
        }

        let mut figment = Figment::new()
            .merge(Serialized::defaults(defaults))
            .merge(Serialized::defaults(ModeDefault { mode: default_mode }));

        if let Some(path) = find_config_file(&root, args.config.as_deref())? {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment
            .merge(
                Env::raw()
                    .only(PLAIN_ENV_KEYS)
                    .filter(|key| is_set(key.as_str())),
            )
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .only(PREFIXED_ENV_KEYS)
                    .filter(|key| {
                        is_set(&format!("{ENV_PREFIX}{}", key.as_str().to_ascii_uppercase()))
                    }),
            )
            .merge(Serialized::defaults(overrides));

        let mut config: Self = figment
            .extract()
            .map_err(|e| ConfigError::Extract(Box::new(e)))?;

        if args.no_template {
            config.template = None;
        }
        if config.cwd.is_none() {
            config.cwd = Some(root);
        }

        Ok(config)
    }

    /// Baseline configuration every layer merges over.
    pub fn default_config() -> Self {
        Self {
            entry: default_entry(),
            out_dir: default_out_dir(),
            source_root: default_source_root(),
            template: None,
            title: default_title(),
            mode: Mode::default(),
            host: default_host(),
            port: default_port(),
            esbuild: default_esbuild(),
            tsconfig: None,
            loaders: default_loaders(),
            debounce_ms: default_debounce_ms(),
            watch_ignore: vec![],
            cwd: None,
        }
    }
}

/// Empty variables count as unset so lower layers show through.
fn is_set(name: &str) -> bool {
    std::env::var_os(name).is_some_and(|value| !value.is_empty())
}

/// An explicit `--config` must exist; the conventional file is optional.
fn find_config_file(root: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) => {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            };
            if !path.is_file() {
                return Err(ConfigError::NotFound(path).into());
            }
            Ok(Some(path))
        }
        None => {
            let path = root.join(CONFIG_FILE_NAME);
            Ok(path.is_file().then_some(path))
        }
    }
}

/// Load `<root>/.env` into the process environment.
///
/// Variables that are already set are left alone. A missing file is not an
/// error; a malformed one is reported and skipped.
pub fn load_dotenv(root: &Path) {
    let path = root.join(".env");
    match dotenvy::from_path(&path) {
        Ok(()) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => crate::ui::warning(&format!("Ignoring {}: {}", path.display(), err)),
    }
}

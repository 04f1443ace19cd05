//! Command implementations for the esdev CLI.
//!
//! - [`build`] - one build, then exit
//! - [`dev`] - build, serve, watch and live-reload
//!
//! Both wire the same pipeline: the esbuild driver wrapped by the clean and
//! index.html plugins, run through a [`BuildRunner`].

pub mod build;
pub mod dev;

pub use build::execute as build_execute;
pub use dev::execute as dev_execute;

use crate::bundler::{BuildResult, BundleOptions, EsbuildBundler};
use crate::config::EsdevConfig;
use crate::error::{BuildError, Result};
use crate::plugins::{CleanPlugin, IndexHtmlPlugin};
use crate::runner::BuildRunner;
use crate::ui;
use esdev_html::{IndexHtmlWriter, LiveReload};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Build pipeline for `config`: clean, esbuild, index.html.
pub fn runner_for(config: &EsdevConfig) -> BuildRunner {
    let out_dir = config.out_dir_path();

    let mut writer = IndexHtmlWriter::new(&out_dir)
        .title(&config.title)
        .dev_mode(config.mode.is_dev())
        .live_reload(LiveReload::new(browser_host(&config.host), config.port));
    if let Some(template) = config.template_path() {
        writer = writer.template(template);
    }

    let bundler = EsbuildBundler::new(BundleOptions::from_config(config));
    BuildRunner::new(Arc::new(bundler))
        .plugin(Arc::new(CleanPlugin::new(&out_dir)))
        .plugin(Arc::new(IndexHtmlPlugin::new(writer)))
}

/// Host browsers should use to reach a server bound to `host`.
///
/// Wildcard bind addresses are not routable, so tabs connect to `localhost`.
pub(crate) fn browser_host(host: &str) -> &str {
    match host {
        "0.0.0.0" | "::" | "[::]" => "localhost",
        other => other,
    }
}

/// Fail early when an entry point is missing instead of waiting on esbuild.
pub(crate) fn check_entries(config: &EsdevConfig) -> Result<()> {
    for entry in &config.entry {
        let path = config.resolve(Path::new(entry));
        if !path.is_file() {
            return Err(BuildError::EntryNotFound(path).into());
        }
    }
    Ok(())
}

/// Working directory named on the command line, before config is loaded.
pub(crate) fn project_root(cwd: Option<&Path>) -> PathBuf {
    cwd.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Summary line plus the emitted files.
pub(crate) fn report_build(result: &BuildResult, config: &EsdevConfig) {
    let warnings = match result.warnings {
        0 => String::new(),
        1 => " with 1 warning".to_string(),
        n => format!(" with {n} warnings"),
    };
    ui::success(&format!(
        "Built in {}{}",
        ui::format_duration(result.duration),
        warnings
    ));
    ui::print_outputs(result.outputs(), &config.root());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use tempfile::TempDir;

    #[test]
    fn test_runner_has_clean_then_index_html() {
        let runner = runner_for(&EsdevConfig::default_config());
        assert_eq!(runner.plugin_names(), vec!["clean", "index-html"]);
    }

    #[test]
    fn test_check_entries() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("src")).unwrap();
        std::fs::write(temp.path().join("src/index.tsx"), "export {}").unwrap();

        let config = EsdevConfig {
            cwd: Some(temp.path().to_path_buf()),
            ..EsdevConfig::default_config()
        };
        assert!(check_entries(&config).is_ok());

        let config = EsdevConfig {
            entry: vec!["src/missing.tsx".to_string()],
            ..config
        };
        let err = check_entries(&config).unwrap_err();
        assert!(matches!(err, CliError::Build(BuildError::EntryNotFound(_))));
    }

    #[test]
    fn test_browser_host_replaces_wildcards() {
        assert_eq!(browser_host("0.0.0.0"), "localhost");
        assert_eq!(browser_host("::"), "localhost");
        assert_eq!(browser_host("[::]"), "localhost");
        assert_eq!(browser_host("localhost"), "localhost");
        assert_eq!(browser_host("192.168.1.20"), "192.168.1.20");
    }

    #[test]
    fn test_project_root() {
        assert_eq!(project_root(None), PathBuf::from("."));
        assert_eq!(
            project_root(Some(Path::new("/srv/app"))),
            PathBuf::from("/srv/app")
        );
    }
}

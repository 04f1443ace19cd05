use super::{BuildResult, BundleOptions, Bundler};
use crate::error::BuildError;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tokio::process::Command;

static METAFILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// The part of esbuild's `--metafile` output we read.
///
/// `outputs` keeps esbuild's ordering, which is the order tags end up in
/// index.html.
#[derive(Debug, Deserialize)]
pub struct Metafile {
    #[serde(default)]
    pub outputs: IndexMap<String, serde_json::Value>,
}

impl Metafile {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn output_paths(&self) -> Vec<String> {
        self.outputs.keys().cloned().collect()
    }
}

/// Runs the `esbuild` executable.
#[derive(Debug, Clone)]
pub struct EsbuildBundler {
    options: BundleOptions,
}

impl EsbuildBundler {
    pub fn new(options: BundleOptions) -> Self {
        Self { options }
    }

    /// Command-line arguments for one build writing its metafile to `metafile`.
    pub fn args(&self, metafile: &Path) -> Vec<OsString> {
        let options = &self.options;
        let mut args: Vec<OsString> = options.entries.iter().map(OsString::from).collect();

        args.push("--bundle".into());
        args.push(prefixed("--outdir=", &options.out_dir));
        args.push(format!("--entry-names={}", options.mode.entry_names()).into());

        if options.mode.is_dev() {
            args.push("--sourcemap".into());
        } else {
            args.push("--minify".into());
        }

        for (extension, loader) in &options.loaders {
            args.push(format!("--loader:{extension}={loader}").into());
        }

        if let Some(tsconfig) = &options.tsconfig {
            args.push(prefixed("--tsconfig=", tsconfig));
        }

        args.push("--allow-overwrite".into());
        args.push("--log-level=warning".into());
        args.push(prefixed("--metafile=", metafile));
        args
    }

    fn metafile_path() -> PathBuf {
        let n = METAFILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("esdev-meta-{}-{n}.json", std::process::id()))
    }

    async fn read_metafile(path: &Path) -> Result<Metafile, BuildError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BuildError::Metafile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::debug!(path = %path.display(), error = %e, "could not remove metafile");
        }

        Metafile::parse(&contents).map_err(|e| BuildError::Metafile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl Bundler for EsbuildBundler {
    async fn build(&self) -> Result<BuildResult, BuildError> {
        let metafile = Self::metafile_path();
        let args = self.args(&metafile);
        let program = self.options.program.display().to_string();

        tracing::debug!(program = %program, ?args, cwd = %self.options.cwd.display(), "running esbuild");

        let start = Instant::now();
        let output = Command::new(&self.options.program)
            .args(&args)
            .current_dir(&self.options.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| BuildError::Spawn {
                program: program.clone(),
                source,
            })?;
        let duration = start.elapsed();

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            let _ = tokio::fs::remove_file(&metafile).await;
            return Err(BuildError::Failed {
                status: output.status.to_string(),
                stderr: stderr.trim_end().to_string(),
            });
        }

        let warnings = count_warnings(&stderr);
        if warnings > 0 {
            tracing::warn!("{}", stderr.trim_end());
        }

        let outputs = Self::read_metafile(&metafile).await?.output_paths();
        tracing::debug!(count = outputs.len(), ?duration, "esbuild finished");

        Ok(BuildResult {
            outputs: Some(outputs),
            duration,
            warnings,
        })
    }
}

fn prefixed(flag: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(path.as_os_str());
    arg
}

/// esbuild prints one `[WARNING]` header per warning.
fn count_warnings(stderr: &str) -> usize {
    stderr.matches("[WARNING]").count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EsdevConfig, Mode};

    fn bundler(mode: Mode) -> EsbuildBundler {
        let config = EsdevConfig {
            mode,
            tsconfig: Some(PathBuf::from("tsconfig.json")),
            ..EsdevConfig::default_config()
        };
        EsbuildBundler::new(BundleOptions::from_config(&config))
    }

    fn args(mode: Mode) -> Vec<String> {
        bundler(mode)
            .args(Path::new("/tmp/meta.json"))
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_development_args() {
        let args = args(Mode::Development);
        assert_eq!(args[0], "src/index.tsx");
        assert!(args.contains(&"--bundle".to_string()));
        assert!(args.contains(&"--outdir=build".to_string()));
        assert!(args.contains(&"--entry-names=[dir]/bundle.[name]-[hash]".to_string()));
        assert!(args.contains(&"--sourcemap".to_string()));
        assert!(!args.contains(&"--minify".to_string()));
        assert!(args.contains(&"--allow-overwrite".to_string()));
        assert!(args.contains(&"--tsconfig=tsconfig.json".to_string()));
        assert_eq!(args.last().unwrap(), "--metafile=/tmp/meta.json");
    }

    #[test]
    fn test_production_args() {
        let args = args(Mode::Production);
        assert!(args.contains(&"--entry-names=bundle".to_string()));
        assert!(args.contains(&"--minify".to_string()));
        assert!(!args.contains(&"--sourcemap".to_string()));
    }

    #[test]
    fn test_loader_args_keep_order() {
        let loaders: Vec<String> = args(Mode::Production)
            .into_iter()
            .filter(|a| a.starts_with("--loader:"))
            .collect();
        assert_eq!(
            loaders,
            vec!["--loader:.jpg=file", "--loader:.png=file", "--loader:.svg=file"]
        );
    }

    #[test]
    fn test_metafile_outputs_in_reported_order() {
        let json = r#"{
            "inputs": { "src/index.tsx": { "bytes": 10, "imports": [] } },
            "outputs": {
                "build/bundle.js.map": { "bytes": 300 },
                "build/bundle.js": { "bytes": 100, "entryPoint": "src/index.tsx" },
                "build/bundle.css": { "bytes": 50 },
                "build/logo-X1Y2.png": { "bytes": 900 }
            }
        }"#;
        let metafile = Metafile::parse(json).unwrap();
        assert_eq!(
            metafile.output_paths(),
            vec![
                "build/bundle.js.map",
                "build/bundle.js",
                "build/bundle.css",
                "build/logo-X1Y2.png"
            ]
        );
    }

    #[test]
    fn test_metafile_without_outputs() {
        let metafile = Metafile::parse(r#"{ "inputs": {} }"#).unwrap();
        assert!(metafile.output_paths().is_empty());
        assert!(Metafile::parse("not json").is_err());
    }

    #[test]
    fn test_count_warnings() {
        let stderr = "▲ [WARNING] Duplicate key \"a\"\n\n▲ [WARNING] Unused import\n";
        assert_eq!(count_warnings(stderr), 2);
        assert_eq!(count_warnings(""), 0);
    }

    #[tokio::test]
    async fn test_missing_executable_is_spawn_error() {
        let config = EsdevConfig {
            esbuild: PathBuf::from("esdev-test-no-such-esbuild"),
            ..EsdevConfig::default_config()
        };
        let bundler = EsbuildBundler::new(BundleOptions::from_config(&config));
        let err = bundler.build().await.unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }
}

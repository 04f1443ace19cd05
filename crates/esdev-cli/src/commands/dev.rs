//! Development server command implementation.
//!
//! Orchestrates the dev server lifecycle:
//! - Initial build
//! - HTTP server with the live-reload stream
//! - Source watching and rebuilds
//! - A refresh event after every successful rebuild
//! - Shutdown on Ctrl+C

use crate::cli::DevArgs;
use crate::commands::{browser_host, check_entries, project_root, report_build, runner_for};
use crate::config::{EsdevConfig, load_dotenv};
use crate::dev::{DevServer, DevServerState, FileChange, FileWatcher, IgnoreRules};
use crate::error::{CliError, Result, ResultExt};
use crate::runner::BuildRunner;
use crate::ui;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::mpsc;

/// Execute the dev command.
///
/// A failing build never stops the server: the error is printed and the
/// last good output keeps being served until the next successful rebuild.
///
/// # Errors
///
/// Configuration problems, a missing entry point, a port that cannot be
/// bound and watcher setup failures are returned.
pub async fn execute(args: DevArgs) -> Result<()> {
    load_dotenv(&project_root(args.project.cwd.as_deref()));

    let config = EsdevConfig::load_for_dev(&args)?;
    config.validate()?;
    check_entries(&config)?;

    ui::info(&format!("Starting esdev ({} mode)", config.mode));
    let state = Arc::new(DevServerState::new(config.out_dir_path()));
    let runner = runner_for(&config);

    // Initial build
    build_once(&runner, &state, &config).await;

    // Server
    let server = DevServer::bind(&config.host, config.port, state.clone())
        .await
        .with_hint("Pass --port or set PORT to use another port")?;
    let url = format!("http://{}:{}/", browser_host(&config.host), config.port);
    ui::success(&format!("Serving {} at {}", config.out_dir.display(), url));
    let mut server_task = tokio::spawn(server.run());

    // Watcher
    let source_root = config.source_root_path();
    let (watcher, mut changes) = FileWatcher::new(
        &source_root,
        ignore_rules(&config),
        config.debounce_ms,
    )
    .context(format!("Failed to watch {}", source_root.display()))?;
    ui::info(&format!("Watching {}", watcher.root().display()));

    if args.open {
        open_browser(&url);
    }
    ui::info("Press Ctrl+C to stop");

    let debounce = Duration::from_millis(config.debounce_ms);
    let watch = watch_loop(&runner, &state, &config, &mut changes, debounce, async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    });

    let outcome = tokio::select! {
        () = watch => Ok(()),
        joined = &mut server_task => match joined {
            Ok(Ok(())) => Err(CliError::Server("Server stopped unexpectedly".to_string())),
            Ok(Err(e)) => Err(e),
            Err(e) => Err(CliError::Server(format!("Server task failed: {e}"))),
        },
    };

    server_task.abort();
    drop(watcher);
    if outcome.is_ok() {
        ui::success("Development server stopped");
    }
    outcome
}

/// Rebuild on every batch of source changes until `shutdown` resolves or the
/// watcher goes away.
///
/// Changes that arrive while a build runs are folded into the next build.
/// A refresh is published after each successful build only.
pub async fn watch_loop<F>(
    runner: &BuildRunner,
    state: &DevServerState,
    config: &EsdevConfig,
    changes: &mut mpsc::Receiver<FileChange>,
    settle: Duration,
    shutdown: F,
) where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => {
                ui::info("Shutting down development server...");
                return;
            }
            change = changes.recv() => {
                let Some(change) = change else {
                    ui::warning("File watcher stopped");
                    return;
                };

                tokio::time::sleep(settle).await;
                let mut batch = vec![change];
                while let Ok(more) = changes.try_recv() {
                    batch.push(more);
                }

                ui::rebuild(&describe(&batch, &config.root()));
                build_once(runner, state, config).await;
            }
        }
    }
}

/// Run one build and record the outcome. Successful builds notify open tabs.
async fn build_once(runner: &BuildRunner, state: &DevServerState, config: &EsdevConfig) {
    state.start_build();

    match runner.run().await {
        Ok(result) => {
            report_build(&result, config);
            let notified = state.complete_build(whole_millis(result.duration));
            tracing::debug!(notified, "refresh published");
        }
        Err(e) => {
            ui::error(&format!("Build failed: {e}"));
            state.fail_build(e.to_string());
        }
    }

    tracing::debug!(status = ?state.status(), "build finished");
}

/// Milliseconds in `duration`, saturating at `u64::MAX`.
fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// What the watcher skips: the output directory plus configured patterns.
fn ignore_rules(config: &EsdevConfig) -> IgnoreRules {
    let root = config.root();
    let root = root.canonicalize().unwrap_or(root);
    let out_dir = if config.out_dir.is_absolute() {
        config.out_dir.clone()
    } else {
        root.join(&config.out_dir)
    };

    IgnoreRules {
        dirs: vec![out_dir],
        patterns: config.watch_ignore.clone(),
    }
}

/// Short description of a batch of changes for the rebuild line.
fn describe(batch: &[FileChange], root: &Path) -> String {
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let first: PathBuf = batch
        .first()
        .map(|change| {
            let path = change.path();
            path.strip_prefix(&root).unwrap_or(path).to_path_buf()
        })
        .unwrap_or_default();

    match batch.len() {
        0 | 1 => first.display().to_string(),
        n => format!("{} and {} more", first.display(), n - 1),
    }
}

/// Open the server URL in the default browser.
fn open_browser(url: &str) {
    use std::process::Command;

    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(url).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", url]).spawn()
    } else {
        Command::new("xdg-open").arg(url).spawn()
    };

    match result {
        Ok(_) => ui::info(&format!("Opened browser at {}", url)),
        Err(e) => ui::warning(&format!("Failed to open browser: {}", e)),
    }
}

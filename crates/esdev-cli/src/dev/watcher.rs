//! Source watcher for `esdev dev`.
//!
//! Watches the source root recursively and forwards relevant changes,
//! ignoring `node_modules`, hidden entries, the output directory and any
//! configured patterns.

use crate::error::{CliError, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Directory names that are never watched.
const ALWAYS_IGNORED: &[&str] = &["node_modules"];

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }

    fn from_event(kind: &EventKind, path: &Path) -> Option<Self> {
        let path = path.to_path_buf();
        match kind {
            EventKind::Create(_) => Some(FileChange::Created(path)),
            EventKind::Modify(_) => Some(FileChange::Modified(path)),
            EventKind::Remove(_) => Some(FileChange::Removed(path)),
            _ => None,
        }
    }
}

/// What the watcher skips.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    /// Absolute directories whose contents are ignored (the output directory)
    pub dirs: Vec<PathBuf>,
    /// `*.ext` suffixes or directory names
    pub patterns: Vec<String>,
}

impl IgnoreRules {
    /// Whether `path` (absolute, below `root`) should be skipped.
    pub fn is_ignored(&self, path: &Path, root: &Path) -> bool {
        let Ok(rel_path) = path.strip_prefix(root) else {
            return true;
        };

        if self.dirs.iter().any(|dir| path.starts_with(dir)) {
            return true;
        }

        let path_str = rel_path.to_string_lossy();
        for pattern in &self.patterns {
            if let Some(ext) = pattern.strip_prefix('*') {
                if path_str.ends_with(ext) {
                    return true;
                }
            } else if rel_path.components().any(|c| c.as_os_str() == pattern.as_str()) {
                return true;
            }
        }

        rel_path.components().any(|component| {
            component.as_os_str().to_str().is_some_and(|name| {
                ALWAYS_IGNORED.contains(&name) || (name.starts_with('.') && name != "." && name != "..")
            })
        })
    }
}

/// Drops repeated events for the same path inside the debounce window.
#[derive(Debug)]
struct Debouncer {
    window: Duration,
    last_seen: HashMap<PathBuf, Instant>,
}

impl Debouncer {
    fn new(window: Duration) -> Self {
        Self {
            window,
            last_seen: HashMap::new(),
        }
    }

    fn accept(&mut self, path: &Path, now: Instant) -> bool {
        if let Some(last) = self.last_seen.get(path) {
            if now.duration_since(*last) < self.window {
                return false;
            }
        }
        self.last_seen.insert(path.to_path_buf(), now);
        if self.last_seen.len() > 1024 {
            let window = self.window;
            self.last_seen.retain(|_, seen| now.duration_since(*seen) < window);
        }
        true
    }
}

/// Recursive watcher; changes arrive on the receiver returned by [`FileWatcher::new`].
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Start watching `root`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::FileNotFound`] when `root` does not exist and
    /// [`CliError::Watch`] when the platform watcher cannot be set up.
    pub fn new(
        root: &Path,
        ignore: IgnoreRules,
        debounce_ms: u64,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        let root = root
            .canonicalize()
            .map_err(|_| CliError::FileNotFound(root.to_path_buf()))?;

        let (tx, rx) = mpsc::channel(100);
        let mut debouncer = Debouncer::new(Duration::from_millis(debounce_ms));
        let watch_root = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "file watcher error");
                    return;
                }
            };

            for path in &event.paths {
                if ignore.is_ignored(path, &watch_root) {
                    continue;
                }
                let Some(change) = FileChange::from_event(&event.kind, path) else {
                    continue;
                };
                if !debouncer.accept(path, Instant::now()) {
                    continue;
                }

                tracing::trace!(?change, "source changed");
                // Receiver gone means the dev loop is shutting down.
                if tx.blocking_send(change).is_err() {
                    return;
                }
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;
        tracing::debug!(root = %root.display(), "watching sources");

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    /// Canonical directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

//! Shared state for the development server.

use crate::dev::RefreshNotifier;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Build status tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// No build has been performed yet
    NotStarted,
    /// Build is currently in progress
    InProgress { started_at: Instant },
    /// Build completed successfully
    Success { duration_ms: u64 },
    /// Build failed with error
    Failed { error: String },
}

/// State shared between the dev loop and the HTTP handlers.
#[derive(Debug)]
pub struct DevServerState {
    status: RwLock<BuildStatus>,
    notifier: RefreshNotifier,
    out_dir: PathBuf,
}

impl DevServerState {
    pub fn new(out_dir: PathBuf) -> Self {
        Self {
            status: RwLock::new(BuildStatus::NotStarted),
            notifier: RefreshNotifier::new(),
            out_dir,
        }
    }

    pub fn start_build(&self) {
        *self.status.write() = BuildStatus::InProgress {
            started_at: Instant::now(),
        };
    }

    /// Record a successful build and tell every open tab to reload.
    ///
    /// Returns the number of tabs notified.
    pub fn complete_build(&self, duration_ms: u64) -> usize {
        *self.status.write() = BuildStatus::Success { duration_ms };
        self.notifier.publish()
    }

    /// Record a failed build. Open tabs keep the last good page.
    pub fn fail_build(&self, error: String) {
        *self.status.write() = BuildStatus::Failed { error };
    }

    pub fn status(&self) -> BuildStatus {
        self.status.read().clone()
    }

    pub fn notifier(&self) -> &RefreshNotifier {
        &self.notifier
    }

    /// Directory served for every path other than `/subscribe`.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

/// Shared state handle for passing around the application.
pub type SharedState = Arc<DevServerState>;

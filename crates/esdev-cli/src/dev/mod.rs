//! Development server module.
//!
//! - [`RefreshNotifier`] fans refresh events out to open browser tabs
//! - [`DevServer`] serves the output directory and the `/subscribe` stream
//! - [`FileWatcher`] reports source changes to the dev loop

pub mod notifier;
pub mod server;
pub mod state;
pub mod watcher;

pub use notifier::{RefreshEvent, RefreshNotifier, Subscriber};
pub use server::{DevServer, REFRESH_DATA, router};
pub use state::{BuildStatus, DevServerState, SharedState};
pub use watcher::{FileChange, FileWatcher, IgnoreRules};

//! Runs builds one at a time with plugin hooks around them.

use crate::bundler::{BuildResult, Bundler};
use crate::error::BuildError;
use crate::plugins::BuildPlugin;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Serializes builds: a build, including every `on_end` hook, finishes
/// before the next one starts.
pub struct BuildRunner {
    bundler: Arc<dyn Bundler>,
    plugins: Vec<Arc<dyn BuildPlugin>>,
    guard: Mutex<()>,
}

impl BuildRunner {
    pub fn new(bundler: Arc<dyn Bundler>) -> Self {
        Self {
            bundler,
            plugins: Vec::new(),
            guard: Mutex::new(()),
        }
    }

    /// Register a plugin. Hooks run in registration order.
    pub fn plugin(mut self, plugin: Arc<dyn BuildPlugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Run one build.
    ///
    /// Waits for any build already in flight. `on_end` hooks only run when
    /// the bundler succeeds; a bundler error is returned unchanged.
    pub async fn run(&self) -> Result<BuildResult, BuildError> {
        let _guard = self.guard.lock().await;

        for plugin in &self.plugins {
            tracing::trace!(plugin = plugin.name(), "on_start");
            plugin.on_start().await;
        }

        let result = self.bundler.build().await?;

        for plugin in &self.plugins {
            tracing::trace!(plugin = plugin.name(), "on_end");
            plugin.on_end(&result).await;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex as SyncMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Bundler that records overlapping builds.
    #[derive(Default)]
    struct FakeBundler {
        fail: bool,
        running: AtomicUsize,
        max_running: AtomicUsize,
        builds: AtomicUsize,
    }

    #[async_trait]
    impl Bundler for FakeBundler {
        async fn build(&self) -> Result<BuildResult, BuildError> {
            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_running.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.running.fetch_sub(1, Ordering::SeqCst);
            self.builds.fetch_add(1, Ordering::SeqCst);

            if self.fail {
                return Err(BuildError::Failed {
                    status: "exit status: 1".to_string(),
                    stderr: "✘ [ERROR] Could not resolve \"react\"".to_string(),
                });
            }
            Ok(BuildResult {
                outputs: Some(vec!["build/bundle.js".to_string()]),
                ..BuildResult::default()
            })
        }
    }

    /// Plugin that records hook calls.
    #[derive(Default)]
    struct RecordingPlugin {
        events: SyncMutex<Vec<String>>,
    }

    #[async_trait]
    impl BuildPlugin for RecordingPlugin {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn on_start(&self) {
            self.events.lock().push("start".to_string());
        }

        async fn on_end(&self, result: &BuildResult) {
            self.events
                .lock()
                .push(format!("end:{}", result.outputs().len()));
        }
    }

    #[tokio::test]
    async fn test_hooks_wrap_successful_build() {
        let plugin = Arc::new(RecordingPlugin::default());
        let runner = BuildRunner::new(Arc::new(FakeBundler::default())).plugin(plugin.clone());

        let result = runner.run().await.unwrap();

        assert_eq!(result.outputs(), ["build/bundle.js"]);
        assert_eq!(*plugin.events.lock(), vec!["start", "end:1"]);
        assert_eq!(runner.plugin_names(), vec!["recording"]);
    }

    #[tokio::test]
    async fn test_failed_build_skips_on_end() {
        let plugin = Arc::new(RecordingPlugin::default());
        let bundler = FakeBundler {
            fail: true,
            ..FakeBundler::default()
        };
        let runner = BuildRunner::new(Arc::new(bundler)).plugin(plugin.clone());

        let err = runner.run().await.unwrap_err();

        assert!(matches!(err, BuildError::Failed { .. }));
        assert_eq!(*plugin.events.lock(), vec!["start"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_builds_never_overlap() {
        let bundler = Arc::new(FakeBundler::default());
        let runner = Arc::new(BuildRunner::new(bundler.clone()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let runner = runner.clone();
                tokio::spawn(async move { runner.run().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(bundler.builds.load(Ordering::SeqCst), 4);
        assert_eq!(bundler.max_running.load(Ordering::SeqCst), 1);
    }
}

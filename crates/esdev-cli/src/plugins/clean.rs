use super::BuildPlugin;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Removes the output directory before each build.
#[derive(Debug, Clone)]
pub struct CleanPlugin {
    out_dir: PathBuf,
}

impl CleanPlugin {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

#[async_trait]
impl BuildPlugin for CleanPlugin {
    fn name(&self) -> &'static str {
        "clean"
    }

    async fn on_start(&self) {
        match tokio::fs::remove_dir_all(&self.out_dir).await {
            Ok(()) => tracing::debug!(dir = %self.out_dir.display(), "cleaned output directory"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                dir = %self.out_dir.display(),
                error = %e,
                "failed to clean output directory"
            ),
        }
    }
}

//! Writes the rendered `index.html` next to the build outputs.

use crate::classify::classify;
use crate::error::{HtmlError, Result};
use crate::render::{RenderOptions, render};
use crate::snippet::LiveReload;
use std::path::{Path, PathBuf};

/// File name of the generated document inside the output directory.
pub const INDEX_FILE_NAME: &str = "index.html";

/// Produces `<out_dir>/index.html` after each successful build.
#[derive(Debug, Clone)]
pub struct IndexHtmlWriter {
    out_dir: PathBuf,
    template: Option<PathBuf>,
    title: Option<String>,
    dev_mode: bool,
    live_reload: LiveReload,
}

impl IndexHtmlWriter {
    /// Create a writer targeting `out_dir`, using the built-in page and no title.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            template: None,
            title: None,
            dev_mode: false,
            live_reload: LiveReload::default(),
        }
    }

    /// Read the document skeleton from `path` on every build.
    pub fn template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = Some(path.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    pub fn live_reload(mut self, live_reload: LiveReload) -> Self {
        self.live_reload = live_reload;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Location the document is written to.
    pub fn index_path(&self) -> PathBuf {
        self.out_dir.join(INDEX_FILE_NAME)
    }

    /// Render the document for a build's reported outputs.
    ///
    /// A build that reported no output list renders a page referencing no
    /// assets.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::TemplateRead`] when a template is configured but
    /// cannot be read. The built-in page is never used as a substitute.
    pub async fn render(&self, outputs: Option<&[String]>) -> Result<String> {
        let template = match &self.template {
            Some(path) => Some(tokio::fs::read_to_string(path).await.map_err(|source| {
                HtmlError::TemplateRead {
                    path: path.clone(),
                    source,
                }
            })?),
            None => None,
        };

        let classified = classify(outputs.unwrap_or_default());
        tracing::debug!(
            scripts = classified.scripts.len(),
            styles = classified.styles.len(),
            "classified build outputs"
        );

        Ok(render(&RenderOptions {
            template,
            title: self.title.clone(),
            script_paths: classified.scripts,
            style_paths: classified.styles,
            dev_mode: self.dev_mode,
            live_reload: self.live_reload.clone(),
        }))
    }

    /// Render and write `index.html`, replacing any previous file.
    ///
    /// Returns the path that was written.
    pub async fn write(&self, outputs: Option<&[String]>) -> Result<PathBuf> {
        let html = self.render(outputs).await?;
        let path = self.index_path();

        let output_err = |source| HtmlError::OutputWrite {
            path: path.clone(),
            source,
        };
        tokio::fs::create_dir_all(&self.out_dir)
            .await
            .map_err(output_err)?;
        tokio::fs::write(&path, html).await.map_err(output_err)?;

        tracing::debug!(path = %path.display(), "wrote index.html");
        Ok(path)
    }
}

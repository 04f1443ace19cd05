use super::BuildPlugin;
use crate::bundler::BuildResult;
use async_trait::async_trait;
use esdev_html::IndexHtmlWriter;

/// Writes `index.html` into the output directory after each successful build.
#[derive(Debug, Clone)]
pub struct IndexHtmlPlugin {
    writer: IndexHtmlWriter,
}

impl IndexHtmlPlugin {
    pub fn new(writer: IndexHtmlWriter) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl BuildPlugin for IndexHtmlPlugin {
    fn name(&self) -> &'static str {
        "index-html"
    }

    async fn on_end(&self, result: &BuildResult) {
        match self.writer.write(result.outputs.as_deref()).await {
            Ok(path) => tracing::debug!(path = %path.display(), "wrote index.html"),
            Err(e) => {
                tracing::error!(path = %e.path().display(), "{}", e);
                crate::ui::error(&format!("index.html not written: {e}"));
            }
        }
    }
}

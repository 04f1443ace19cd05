//! Build lifecycle hooks.
//!
//! Every build runs each plugin's [`BuildPlugin::on_start`] before the
//! bundler starts and, when the bundler succeeds, [`BuildPlugin::on_end`]
//! with its result. Hooks never fail the build; they log their own problems.

mod clean;
mod index_html;

pub use clean::CleanPlugin;
pub use index_html::IndexHtmlPlugin;

use crate::bundler::BuildResult;
use async_trait::async_trait;

#[async_trait]
pub trait BuildPlugin: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    async fn on_start(&self) {}

    async fn on_end(&self, _result: &BuildResult) {}
}

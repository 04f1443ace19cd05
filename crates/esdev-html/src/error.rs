//! Error types for index.html generation

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing `index.html`
#[derive(Error, Debug, Diagnostic)]
pub enum HtmlError {
    /// The configured template could not be read
    #[error("Failed to read HTML template {}: {source}", path.display())]
    #[diagnostic(
        code(esdev::html::template_read),
        help("Check the 'template' field in esdev.config.json or remove it to use the built-in page")
    )]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rendered document could not be written
    #[error("Failed to write {}: {source}", path.display())]
    #[diagnostic(
        code(esdev::html::output_write),
        help("Check output directory permissions")
    )]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HtmlError {
    /// Path of the file involved in the failure.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::TemplateRead { path, .. } | Self::OutputWrite { path, .. } => path,
        }
    }
}

/// Result type for index.html generation
pub type Result<T> = std::result::Result<T, HtmlError>;

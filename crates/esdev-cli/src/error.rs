//! Error handling for the esdev CLI.
//!
//! A small hierarchy built on `thiserror`:
//! - [`CliError`] is what commands return
//! - [`ConfigError`] and [`BuildError`] carry domain-specific context and
//!   convert into [`CliError`] via `#[from]`
//!
//! Failures that the build lifecycle deliberately tolerates (output-write
//! errors, a failed clean of the output directory, a disconnected browser)
//! are logged where they happen and never reach this module.

mod report;

pub use report::cli_error_to_miette;

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid syntax, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The bundler failed or could not be run
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Development server errors
    #[error("Server error: {0}")]
    Server(String),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file given with --config doesn't exist
    #[error("Config file not found: {}\n\nHint: Create an esdev.config.json file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },

    /// Layered configuration could not be merged or deserialized
    #[error("Failed to load configuration: {0}\n\nHint: Check esdev.config.json syntax and the TITLE/MODE/PORT environment variables")]
    Extract(#[from] Box<figment::Error>),
}

/// Build process errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The esbuild executable could not be started
    #[error("Failed to run {program}: {source}\n\nHint: Install esbuild (npm i -D esbuild) or set the 'esbuild' field to its path")]
    Spawn {
        /// Program that was executed
        program: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// esbuild exited with a non-zero status
    #[error("esbuild failed ({status}):\n{stderr}")]
    Failed {
        /// Exit status as reported by the OS
        status: String,
        /// Captured diagnostics
        stderr: String,
    },

    /// The metafile esbuild wrote could not be parsed
    #[error("Invalid metafile {}: {reason}", path.display())]
    Metafile {
        /// Metafile location
        path: PathBuf,
        /// Parse failure
        reason: String,
    },

    /// Entry point file doesn't exist
    #[error("Entry point not found: {}\n\nHint: Check the 'entry' field in your config", .0.display())]
    EntryNotFound(PathBuf),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_not_found() {
        let err = ConfigError::NotFound(PathBuf::from("esdev.config.json"));
        let msg = err.to_string();
        assert!(msg.contains("Config file not found"));
        assert!(msg.contains("esdev.config.json"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_build_error_failed_includes_stderr() {
        let err = BuildError::Failed {
            status: "exit status: 1".to_string(),
            stderr: "✘ [ERROR] Could not resolve \"react\"".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("exit status: 1"));
        assert!(msg.contains("Could not resolve"));
    }

    #[test]
    fn test_build_error_spawn_hint() {
        let err = BuildError::Spawn {
            program: "esbuild".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("Install esbuild"));
    }

    #[test]
    fn test_cli_error_from_build_error() {
        let build_err = BuildError::EntryNotFound(PathBuf::from("src/index.tsx"));
        let cli_err: CliError = build_err.into();
        assert!(matches!(cli_err, CliError::Build(_)));
    }

    #[test]
    fn test_result_ext_with_hint() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::NotFound(PathBuf::from("test.json")));

        let err = result.with_hint("Try creating the file").unwrap_err();
        assert!(err.to_string().contains("Hint: Try creating the file"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::NotFound(PathBuf::from("test.json")));

        let err = result.context("Failed to initialize").unwrap_err();
        assert!(err.to_string().starts_with("Failed to initialize: "));
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "port".to_string(),
            value: "0".to_string(),
            hint: "Use a port between 1 and 65535".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid value for 'port'"));
        assert!(msg.contains("between 1 and 65535"));
    }
}

use crate::config::EsdevConfig;
use crate::error::{ConfigError, Result};

/// Validate a loader mapping entry such as `".png": "file"`.
pub fn validate_loader(extension: &str, loader: &str) -> Result<()> {
    if !extension.starts_with('.') || extension.len() < 2 {
        return Err(ConfigError::InvalidValue {
            field: "loaders".to_string(),
            value: extension.to_string(),
            hint: format!("Loader keys are file extensions with a leading dot (got '{extension}')"),
        }
        .into());
    }

    if loader.is_empty() || !loader.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ConfigError::InvalidValue {
            field: format!("loaders.{extension}"),
            value: loader.to_string(),
            hint: "Use an esbuild loader name such as file, dataurl, text or base64".to_string(),
        }
        .into());
    }

    Ok(())
}

impl EsdevConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.entry.is_empty() {
            return Err(ConfigError::MissingField {
                field: "entry".to_string(),
                hint: "Provide at least one entry point".to_string(),
            }
            .into());
        }

        if let Some(blank) = self.entry.iter().find(|e| e.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "entry".to_string(),
                value: blank.clone(),
                hint: "Entry points cannot be empty strings".to_string(),
            }
            .into());
        }

        if self.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "outDir".to_string(),
                value: String::new(),
                hint: "The output directory is cleared on every build and must be set".to_string(),
            }
            .into());
        }

        // Cleaning the working directory itself would wipe the project.
        if self.resolve(&self.out_dir) == self.root() {
            return Err(ConfigError::InvalidValue {
                field: "outDir".to_string(),
                value: self.out_dir.display().to_string(),
                hint: "Choose a subdirectory such as build/".to_string(),
            }
            .into());
        }

        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                value: "0".to_string(),
                hint: "The live-reload snippet needs a fixed port".to_string(),
            }
            .into());
        }

        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "host".to_string(),
                hint: "Set a host name such as localhost".to_string(),
            }
            .into());
        }

        if self.esbuild.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "esbuild".to_string(),
                hint: "Point esbuild at the executable, e.g. node_modules/.bin/esbuild".to_string(),
            }
            .into());
        }

        for (extension, loader) in &self.loaders {
            validate_loader(extension, loader)?;
        }

        Ok(())
    }
}

//! Error handling for the Quetzal CLI.
//!
//! Library errors are wrapped in [`CliError`] and turned into a
//! `miette::Report` at the top of `main`.

use std::path::PathBuf;

use miette::Report;
use quetzal_config::ConfigError;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Resolution, loading or validation failures from `quetzal-config`
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A `QUETZAL_` environment override does not fit the declaration
    #[error("Invalid environment override {variable}: {message}")]
    EnvOverride { variable: String, message: String },

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a CliError to a miette Report with an actionable hint
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(ConfigError::InvalidConfiguration { field, message }) => miette::miette!(
            help = format!("Check the `{field}` field of your quetzal.toml"),
            "Invalid configuration: {field}: {message}"
        ),
        CliError::Config(ConfigError::EntryNotFound(path)) => miette::miette!(
            help = "The entry path is resolved relative to the config file, not the working directory",
            "Entry point not found: {}",
            path.display()
        ),
        CliError::Config(ConfigError::Load { path, message }) => miette::miette!(
            help = "Check the file's syntax and field types",
            "Failed to load {}: {message}",
            path.display()
        ),
        CliError::EnvOverride { variable, message } => miette::miette!(
            help = format!("Unset `{variable}` or give it a value of the right type"),
            "Invalid environment override {variable}: {message}"
        ),
        other => miette::miette!("{}", other),
    }
}

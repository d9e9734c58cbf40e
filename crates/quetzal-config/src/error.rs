//! Error types for configuration resolution, loading and transform chains.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The static declaration is malformed or its paths cannot be resolved.
    #[error("invalid configuration: {field}: {message}")]
    InvalidConfiguration { field: String, message: String },

    /// A named transform step is unknown or failed while being applied.
    #[error("transform chain failed for {}: step `{step}`: {message}", file.display())]
    TransformChain {
        file: PathBuf,
        step: String,
        message: String,
    },

    // Filesystem validation errors (engine-side checks)
    #[error("entry path not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    // Config discovery/loading errors
    #[error("config not found")]
    NotFound,

    #[error("failed to load config from {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_names_the_field() {
        let err = ConfigError::invalid("entry", "must not be empty");
        assert_eq!(
            err.to_string(),
            "invalid configuration: entry: must not be empty"
        );
    }

    #[test]
    fn transform_chain_names_file_and_step() {
        let err = ConfigError::TransformChain {
            file: PathBuf::from("/app/js/util.js"),
            step: "babel-loader".to_string(),
            message: "unknown transform step".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/app/js/util.js"));
        assert!(msg.contains("`babel-loader`"));
    }
}

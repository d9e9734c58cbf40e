//! Pluggable config validation strategies
//!
//! Separates schema validation (no I/O, safe anywhere) from the filesystem
//! check the bundling engine performs before it starts work.

use std::path::Path;

use crate::bundle::BundleConfiguration;
use crate::declaration::RuleRole;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &BundleConfiguration) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// Extensions may rewrite a resolved configuration, so this re-checks the
/// invariants the resolver established.
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BundleConfiguration) -> Result<()> {
        require_absolute("context", &config.context)?;
        require_absolute("entry", &config.entry_path)?;
        require_absolute("output.path", &config.output.directory)?;

        if config.output.filename.trim().is_empty() {
            return Err(ConfigError::invalid(
                "output.filename",
                "filename must not be empty",
            ));
        }

        if config.output.exposed_name.trim().is_empty() {
            return Err(ConfigError::invalid(
                "output.library",
                "exposed library name must not be empty",
            ));
        }

        for (index, rule) in config.rules.iter().enumerate() {
            if rule.role == RuleRole::Entry && !rule.chain.is_empty() {
                return Err(ConfigError::invalid(
                    format!("rules[{index}].use"),
                    "entry marker rules cannot carry a transform chain",
                ));
            }

            if rule.chain.iter().any(|step| step.name.trim().is_empty()) {
                return Err(ConfigError::invalid(
                    format!("rules[{index}].use"),
                    "transform step name must not be empty",
                ));
            }
        }

        let mut markers = config
            .rules
            .iter()
            .filter(|rule| rule.role == RuleRole::Entry)
            .peekable();
        if markers.peek().is_some() && !markers.any(|rule| rule.applies_to(&config.entry_path)) {
            return Err(ConfigError::invalid(
                "rules",
                format!(
                    "no entry marker rule applies to the entry {}",
                    config.entry_path.display()
                ),
            ));
        }

        Ok(())
    }
}

/// Filesystem validator (engine-side fail-fast check)
///
/// Runs schema validation, then requires the entry file to exist.
pub struct FsValidator;

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BundleConfiguration) -> Result<()> {
        SchemaValidator.validate(config)?;

        if !config.entry_path.is_file() {
            return Err(ConfigError::EntryNotFound(config.entry_path.clone()));
        }

        Ok(())
    }
}

fn require_absolute(field: &str, path: &Path) -> Result<()> {
    if path.is_absolute() {
        return Ok(());
    }
    Err(ConfigError::invalid(
        field,
        format!("{} must be absolute", path.display()),
    ))
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &BundleConfiguration) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &BundleConfiguration) -> Result<()> {
    FsValidator.validate(config)
}

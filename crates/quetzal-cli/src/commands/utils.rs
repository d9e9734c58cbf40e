//! Shared utilities for command implementations.
//!
//! - Working directory lookup
//! - Declaration loading (explicit file, discovery, built-in fallback)
//! - Environment overrides

use std::path::{Path, PathBuf};

use figment::providers::{Env, Serialized};
use figment::Figment;
use quetzal_config::{BundleConfiguration, BundleDeclaration, ConfigDiscovery, ConfigResolver};
use tracing::{debug, info};

use crate::cli::ConfigArgs;
use crate::error::{CliError, Result};

/// Prefix of environment variables that override declaration fields.
///
/// Nested keys are separated by a double underscore, e.g.
/// `QUETZAL_OUTPUT__LIBRARY=hooks`.
pub const ENV_PREFIX: &str = "QUETZAL_";

/// Get the current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(CliError::from)
}

/// Resolve a path relative to a working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Load and resolve the configuration selected by `args`.
///
/// Priority: environment variables > config file > built-in hooks declaration.
/// `cwd` is only used to locate files named on the command line and for
/// discovery; relative paths inside the declaration resolve against the
/// declaration's own directory.
pub fn load_configuration(args: &ConfigArgs, cwd: &Path) -> Result<BundleConfiguration> {
    let declaration = load_declaration(args, cwd)?;

    let mut resolver = ConfigResolver::new();
    if let Some(base) = &args.base {
        resolver = resolver.with_base_dir(resolve_path(base, cwd));
    } else if declaration.origin.is_none() {
        resolver = resolver.with_base_dir(cwd);
    }

    Ok(resolver.resolve(&declaration)?)
}

fn load_declaration(args: &ConfigArgs, cwd: &Path) -> Result<BundleDeclaration> {
    let origin = match &args.config {
        Some(path) => Some(ConfigDiscovery::locate(&resolve_path(path, cwd))?),
        None => ConfigDiscovery::new(cwd)
            .find()
            .map(|path| ConfigDiscovery::locate(&path))
            .transpose()?,
    };

    match origin {
        Some(origin) => {
            debug!(config = %origin.display(), "using config file");
            // The file alone must load, so that a failure after merging the
            // environment is reported against the variable.
            ConfigDiscovery::extract(ConfigDiscovery::figment(&origin), &origin)?;
            Ok(with_env_overrides(ConfigDiscovery::figment(&origin))?.with_origin(&origin))
        }
        None => {
            info!("No quetzal.toml found, using the built-in hooks declaration");
            with_env_overrides(Figment::from(Serialized::defaults(BundleDeclaration::hooks())))
        }
    }
}

fn with_env_overrides(figment: Figment) -> Result<BundleDeclaration> {
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract::<BundleDeclaration>()
        .map_err(env_error)
}

fn env_error(err: figment::Error) -> CliError {
    CliError::EnvOverride {
        variable: env_variable(&err.path),
        message: err.kind.to_string(),
    }
}

/// Environment variable that sets the declaration field at `path`
fn env_variable(path: &[String]) -> String {
    if path.is_empty() {
        return format!("{ENV_PREFIX}*");
    }
    format!("{ENV_PREFIX}{}", path.join("__").to_uppercase())
}

//! Wrap command implementation.

use std::fs;
use std::path::PathBuf;

use quetzal_config::BundleConfiguration;
use tracing::debug;

use crate::cli::WrapArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Wrap the body and print it, or write it to the configured output path.
pub fn execute(args: WrapArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let config = utils::load_configuration(&args.config, &cwd)?;

    let body_path = utils::resolve_path(&args.body, &cwd);
    if !body_path.is_file() {
        return Err(CliError::FileNotFound(body_path));
    }
    let body = fs::read_to_string(&body_path)?;
    let artifact = config.output.render_wrapper(&body);

    if args.write {
        let written = write_artifact(&config, &artifact)?;
        ui::success(&format!("Wrote {}", written.display()));
    } else {
        print!("{artifact}");
    }
    Ok(())
}

/// Write `artifact` to the configured output path, creating the directory.
pub fn write_artifact(config: &BundleConfiguration, artifact: &str) -> Result<PathBuf> {
    let path = config.output.output_path();
    debug!(path = %path.display(), "writing artifact");
    fs::create_dir_all(&config.output.directory)?;
    fs::write(&path, artifact)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quetzal_config::{BundleDeclaration, ConfigResolver};
    use tempfile::TempDir;

    #[test]
    fn test_write_artifact_creates_output_directory() {
        let temp = TempDir::new().unwrap();
        let config = ConfigResolver::new()
            .with_base_dir(temp.path().join("assets"))
            .resolve(&BundleDeclaration::hooks())
            .unwrap();

        let artifact = config.output.render_wrapper("return {};");
        let path = write_artifact(&config, &artifact).unwrap();

        assert_eq!(
            path,
            temp.path().join("priv").join("static").join("quetzal_hooks.js")
        );
        assert_eq!(fs::read_to_string(path).unwrap(), artifact);
    }
}

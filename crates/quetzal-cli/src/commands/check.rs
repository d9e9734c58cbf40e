//! Check command implementation.
//!
//! Resolves the configuration, then runs the schema and filesystem validators.

use quetzal_config::{validate_fs, BundleConfiguration};

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Errors
///
/// Returns errors for invalid configuration or a missing entry file.
pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking configuration...");

    let cwd = utils::get_cwd()?;
    let config = utils::load_configuration(&args.config, &cwd)?;
    ui::success("Configuration resolves");

    check(&config)?;

    ui::success(&format!("  {} exists", config.entry_path.display()));
    ui::success("All checks passed!");
    Ok(())
}

pub fn check(config: &BundleConfiguration) -> Result<()> {
    if config.rules.is_empty() {
        ui::warning("No rules declared; every file passes through unmodified");
    }
    validate_fs(config)?;
    Ok(())
}

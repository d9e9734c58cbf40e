//! Resolve command implementation.

use quetzal_config::BundleConfiguration;

use crate::cli::ResolveArgs;
use crate::commands::utils;
use crate::error::Result;

/// Print the resolved configuration as pretty JSON on stdout.
pub fn execute(args: ResolveArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let config = utils::load_configuration(&args.config, &cwd)?;
    println!("{}", render(&config)?);
    Ok(())
}

pub fn render(config: &BundleConfiguration) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

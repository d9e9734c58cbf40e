//! Command-line interface definition for Quetzal.
//!
//! # Command Structure
//!
//! - `quetzal resolve` - Print the resolved bundle configuration as JSON
//! - `quetzal match` - Show which rules apply to source files
//! - `quetzal wrap` - Wrap a compiled body in the exposure prelude
//! - `quetzal check` - Validate the configuration and the entry file

mod commands;

use clap::Parser;

pub use commands::{CheckArgs, Command, ConfigArgs, MatchArgs, ResolveArgs, WrapArgs};

/// Quetzal - bundle configuration for the hooks library
#[derive(Parser, Debug)]
#[command(
    name = "quetzal",
    version,
    about = "Inspect and check the Quetzal hooks bundle configuration",
    long_about = "Resolves the declarative bundle configuration that produces the\n\
                  Quetzal hooks artifact, shows which transform chain each source file\n\
                  gets, and renders the universal module wrapper."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available Quetzal subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration as JSON
    ///
    /// Every path in the output is absolute and normalized against the
    /// directory the declaration was loaded from.
    Resolve(ResolveArgs),

    /// Show the rule selection for one or more source files
    ///
    /// Relative paths are taken relative to the configuration's context
    /// directory, not the working directory.
    Match(MatchArgs),

    /// Wrap a compiled bundle body in the universal module prelude
    Wrap(WrapArgs),

    /// Resolve and validate the configuration
    ///
    /// Runs the schema checks and verifies that the entry file exists.
    Check(CheckArgs),
}

/// Where the declaration comes from
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a quetzal.toml or package.json
    ///
    /// Without this flag, quetzal.toml (then a `quetzal` field in
    /// package.json) is looked up in the current directory. When neither
    /// exists the built-in hooks declaration is used.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Resolve relative paths against DIR instead of the config file's directory
    #[arg(long, value_name = "DIR")]
    pub base: Option<PathBuf>,
}

/// Arguments for the resolve command
#[derive(Args, Debug, Clone, Default)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the match command
#[derive(Args, Debug, Clone)]
pub struct MatchArgs {
    /// Source files to evaluate
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the wrap command
#[derive(Args, Debug, Clone)]
pub struct WrapArgs {
    /// File holding the compiled module body
    #[arg(value_name = "BODY")]
    pub body: PathBuf,

    /// Write the artifact to the configured output path instead of stdout
    #[arg(short, long)]
    pub write: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the check command
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

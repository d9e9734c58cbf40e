//! Quetzal CLI - inspect and check the hooks bundle configuration.
//!
//! The CLI is a thin shell over `quetzal-config`:
//!
//! - [`error`] - Error types converted to miette reports
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Colored status lines on stderr
//! - [`cli`] - Argument definitions
//! - [`commands`] - Command implementations
//!
//! # Example
//!
//! ```rust
//! use quetzal_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};

//! Command implementations for the Quetzal CLI.
//!
//! - [`resolve`] - Print the resolved configuration
//! - [`matches`] - Rule selection per source file
//! - [`wrap`] - Render the exposure prelude around a compiled body
//! - [`check`] - Schema and filesystem validation
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod check;
pub mod matches;
pub mod resolve;
pub mod utils;
pub mod wrap;

pub use check::execute as check_execute;
pub use matches::execute as match_execute;
pub use resolve::execute as resolve_execute;
pub use wrap::execute as wrap_execute;

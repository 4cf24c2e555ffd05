//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the adlens binary.

mod analyze;
mod commands;
mod summarize;

pub use analyze::run_analyze;
pub use commands::{Cli, Commands};
pub use summarize::run_summarize;

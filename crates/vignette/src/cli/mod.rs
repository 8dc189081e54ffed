//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the vignette binary.

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::run_command;

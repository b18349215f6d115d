//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the vitrine binary.

mod catalog;
mod commands;

pub use catalog::{handle_command, load_config};
pub use commands::{Cli, Commands};

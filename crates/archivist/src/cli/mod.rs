//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the archivist binary.

mod commands;
mod handlers;

pub use commands::Cli;
pub use handlers::handle_command;

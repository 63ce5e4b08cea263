//! CLI module for the interview API
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP server
//! - collections: List collections in a file-backed store

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{collections, run, run_command, serve, ServeOptions};
pub use errors::{CliError, CliErrorCode, CliResult};

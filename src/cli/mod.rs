//! CLI module for portfolio-counter
//!
//! Provides command-line interface for:
//! - serve: Ensure the schema, then serve the HTTP API
//! - bootstrap: Ensure the schema and exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, DatabaseArgs, ServeArgs};
pub use commands::{bootstrap, open_store, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};

//! CLI module for the sinaxario service
//!
//! Provides command-line interface for:
//! - serve: Boot and serve the HTTP API
//! - ping: Verify store connectivity and exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{open_store, ping, run, run_command, serve, ServeOptions};
pub use errors::{CliError, CliErrorCode, CliResult};

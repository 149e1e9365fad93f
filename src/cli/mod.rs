//! CLI module for enrolldb
//!
//! Provides command-line interface for:
//! - serve: Open the store and run the HTTP server
//! - check: Validate one candidate record and print the outcome
//! - init-config: Write a default configuration file

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, init_config, run, run_command, serve};
pub use config::{Config, LoggingConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_candidate, write_json};

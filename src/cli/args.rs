//! CLI argument definitions using clap
//!
//! Commands:
//! - enrolldb serve [--config <path>] [--port <port>]
//! - enrolldb check [--file <path>] [--update]
//! - enrolldb init-config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// enrolldb - student enrollment records service
#[derive(Parser, Debug)]
#[command(name = "enrolldb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate a candidate record read from a file or stdin
    Check {
        /// JSON file holding one candidate object (stdin when omitted)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Validate as a sparse update instead of a create
        #[arg(long)]
        update: bool,
    },

    /// Write the default configuration file
    InitConfig {
        /// Destination path
        #[arg(long, default_value = "./enrolldb.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

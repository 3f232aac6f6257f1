//! CLI argument definitions using clap
//!
//! Commands:
//! - encore init --config <path>
//! - encore start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// encore - a small document-backed CRUD service for singer rosters
#[derive(Parser, Debug)]
#[command(name = "encore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file and an empty data file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./encore.json")]
        config: PathBuf,
    },

    /// Start the HTTP service
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./encore.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

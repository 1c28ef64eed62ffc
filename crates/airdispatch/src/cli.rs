//! Command-line interface for airdispatch.
//!
//! The binary takes global flags only; it always runs the dispatcher demo.

use std::path::PathBuf;

use clap::Parser;

use crate::logging::Verbosity;

/// airdispatch - Airport flight dispatcher
///
/// Registers a couple of sample flights with the shared dispatcher, lists
/// them, and saves the flight list to JSON.
#[derive(Debug, Parser)]
#[command(name = "airdispatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

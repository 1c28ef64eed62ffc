//! Logging configuration for airdispatch.
//!
//! This module provides initialization for the tracing-based logging used
//! throughout airdispatch. Registry changes are reported at `info`, file I/O
//! at `debug`.

use std::io;

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Suppress all output except errors.
    Quiet,
    /// Normal output level (info and above).
    #[default]
    Normal,
    /// Verbose output (debug and above).
    Verbose,
    /// Very verbose output (trace level).
    Trace,
}

impl Verbosity {
    /// Convert verbosity to tracing level filter.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Map `-q` and repeated `-v` flags onto a verbosity.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Trace,
        }
    }
}

/// Filter directive used when `RUST_LOG` is not set.
///
/// The library and the `airdispatch` binary share this target name.
#[must_use]
pub fn default_directive(verbosity: Verbosity) -> String {
    format!("airdispatch={}", verbosity.to_level_filter())
}

/// Initialize the logging system.
///
/// Events go to stderr without timestamps, so they read as console notices
/// next to the demo output on stdout. `RUST_LOG` takes precedence over
/// `verbosity` when set.
///
/// Returns `false` if a subscriber was already installed, in which case this
/// call changes nothing.
///
/// # Examples
///
/// ```no_run
/// use airdispatch::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .without_time()
                .with_target(false),
        )
        .try_init()
        .is_ok()
}

/// Initialize logging for tests.
///
/// Shows warnings and errors unless `RUST_LOG` asks for more.
#[cfg(test)]
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

//! `airdispatch` - An in-memory flight registry with JSON-file persistence
//!
//! This library provides a process-wide flight dispatcher that registers
//! flights, attaches passengers to them, and saves/restores the flight list
//! through a JSON file.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod flight;
pub mod logging;
pub mod storage;

pub use config::Config;
pub use dispatcher::Dispatcher;
pub use error::{Error, Result};
pub use flight::{Flight, FlightRecord, Passenger};
pub use logging::init_logging;
pub use storage::{FlightStore, DEFAULT_FLIGHTS_PATH};

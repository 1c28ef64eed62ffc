//! The flight dispatcher.
//!
//! [`Dispatcher`] owns the authoritative list of flights for the process and
//! delegates durability to a [`FlightStore`]. Code that can pass a handle
//! around should build one with [`Dispatcher::open`]; code that needs the
//! process-wide registry uses [`Dispatcher::instance`].

use std::path::Path;
use std::slice;
use std::sync::{Mutex, OnceLock, PoisonError};

use tracing::{debug, info};

use crate::error::Result;
use crate::flight::{Flight, FlightRecord};
use crate::storage::{FlightStore, DEFAULT_FLIGHTS_PATH};

/// The process-wide dispatcher, set on first successful access.
static INSTANCE: OnceLock<Mutex<Dispatcher>> = OnceLock::new();

/// Serializes first construction so the flights file is loaded only once.
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// In-memory flight registry backed by a JSON file.
///
/// Flights are kept in registration order and are never removed. The list
/// and the file may diverge until [`save_flights`](Self::save_flights) is
/// called.
#[derive(Debug)]
pub struct Dispatcher {
    /// Registered flights, in registration order.
    flights: Vec<Flight>,
    /// Where flights are persisted.
    store: FlightStore,
}

impl Dispatcher {
    /// Create a dispatcher bound to `store` and load the flights saved there.
    ///
    /// # Errors
    ///
    /// Returns an error if the flights file exists but cannot be read or
    /// parsed.
    pub fn open(store: FlightStore) -> Result<Self> {
        let mut dispatcher = Self {
            flights: Vec::new(),
            store,
        };
        dispatcher.load_flights()?;
        Ok(dispatcher)
    }

    /// Get the process-wide dispatcher, bound to `result/flights.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if this call constructs the dispatcher and loading
    /// the flights file fails.
    pub fn instance() -> Result<&'static Mutex<Self>> {
        Self::instance_with(DEFAULT_FLIGHTS_PATH)
    }

    /// Get the process-wide dispatcher, binding it to `path` if it does not
    /// exist yet.
    ///
    /// Once the dispatcher has been constructed, `path` is ignored and the
    /// existing instance is returned untouched. A failed construction leaves
    /// nothing behind, so a later call may try again.
    ///
    /// # Errors
    ///
    /// Returns an error if this call constructs the dispatcher and loading
    /// the flights file fails.
    pub fn instance_with(path: impl AsRef<Path>) -> Result<&'static Mutex<Self>> {
        if let Some(dispatcher) = INSTANCE.get() {
            return Ok(dispatcher);
        }

        // The guarded value is (), so a poisoned lock carries no broken state.
        let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(dispatcher) = INSTANCE.get() {
            return Ok(dispatcher);
        }

        let dispatcher = Self::open(FlightStore::new(path))?;
        debug!(
            "Dispatcher initialized with {}",
            dispatcher.store.path().display()
        );
        Ok(INSTANCE.get_or_init(|| Mutex::new(dispatcher)))
    }

    /// Register a flight and return it so passengers can be attached.
    ///
    /// Flight numbers are not checked for uniqueness.
    pub fn add_flight(&mut self, flight: Flight) -> &mut Flight {
        let index = self.flights.len();
        self.flights.push(flight);
        let flight = &mut self.flights[index];
        info!("Added {flight}");
        flight
    }

    /// Iterate over the registered flights in registration order.
    ///
    /// The iterator is cheap to clone, so it can be walked more than once.
    #[must_use]
    pub fn list_flights(&self) -> slice::Iter<'_, Flight> {
        if self.flights.is_empty() {
            info!("No active flights");
        }
        self.flights.iter()
    }

    /// Find the first flight with the given number.
    pub fn flight_mut(&mut self, flight_number: &str) -> Option<&mut Flight> {
        self.flights
            .iter_mut()
            .find(|flight| flight.flight_number == flight_number)
    }

    /// Write every flight to the store, overwriting the file.
    ///
    /// Passengers are not persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot write the file.
    pub fn save_flights(&self) -> Result<()> {
        let records: Vec<FlightRecord> = self.flights.iter().map(FlightRecord::from).collect();
        self.store.save(&records)?;
        info!(
            "Saved {} flights to {}",
            records.len(),
            self.store.path().display()
        );
        Ok(())
    }

    /// Replace the in-memory list with the flights held by the store.
    fn load_flights(&mut self) -> Result<()> {
        self.flights = self
            .store
            .load()?
            .into_iter()
            .map(Flight::from)
            .collect();
        info!("Loaded {} flights", self.flights.len());
        Ok(())
    }

    /// Registered flights, in registration order.
    #[must_use]
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// Number of registered flights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Check if no flights are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Get the store this dispatcher persists to.
    #[must_use]
    pub fn store(&self) -> &FlightStore {
        &self.store
    }
}

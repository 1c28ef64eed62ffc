//! Core flight types for airdispatch.
//!
//! This module defines the in-memory [`Flight`] and [`Passenger`] entities and
//! the flat [`FlightRecord`] that is written to disk.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A traveler attached to a flight.
#[derive(Debug, Clone)]
pub struct Passenger {
    /// Full name of the passenger.
    pub name: String,
    /// Passport identifier.
    pub passport: String,
}

impl Passenger {
    /// Create a new passenger.
    #[must_use]
    pub fn new(name: impl Into<String>, passport: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passport: passport.into(),
        }
    }
}

impl fmt::Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.passport)
    }
}

/// A scheduled departure and the passengers booked on it.
///
/// The flight number is unique by convention only; nothing enforces it.
/// Passengers live only in memory and are dropped when the flight is
/// converted into a [`FlightRecord`].
#[derive(Debug, Clone)]
pub struct Flight {
    /// Flight identifier, e.g. `SU100`.
    pub flight_number: String,
    /// Destination city.
    pub destination: String,
    /// Free-form departure time, e.g. `12:30`.
    pub departure_time: String,
    passengers: Vec<Passenger>,
}

impl Flight {
    /// Create a new flight with no passengers.
    #[must_use]
    pub fn new(
        flight_number: impl Into<String>,
        destination: impl Into<String>,
        departure_time: impl Into<String>,
    ) -> Self {
        Self {
            flight_number: flight_number.into(),
            destination: destination.into(),
            departure_time: departure_time.into(),
            passengers: Vec::new(),
        }
    }

    /// Append a passenger to this flight.
    pub fn add_passenger(&mut self, passenger: Passenger) {
        self.passengers.push(passenger);
    }

    /// Passengers in the order they were added.
    #[must_use]
    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Flight {} -> {} ({})",
            self.flight_number, self.destination, self.departure_time
        )
    }
}

/// The persisted form of a [`Flight`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Flight identifier.
    pub flight_number: String,
    /// Destination city.
    pub destination: String,
    /// Free-form departure time.
    pub departure_time: String,
}

impl From<&Flight> for FlightRecord {
    fn from(flight: &Flight) -> Self {
        Self {
            flight_number: flight.flight_number.clone(),
            destination: flight.destination.clone(),
            departure_time: flight.departure_time.clone(),
        }
    }
}

impl From<FlightRecord> for Flight {
    fn from(record: FlightRecord) -> Self {
        Self::new(record.flight_number, record.destination, record.departure_time)
    }
}

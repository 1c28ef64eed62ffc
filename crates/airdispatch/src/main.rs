//! `airdispatch` - demo binary for the flight dispatcher
//!
//! Acquires the shared dispatcher, registers two sample flights with one
//! passenger each, prints the active flights, and saves them to JSON.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;

use airdispatch::cli::Cli;
use airdispatch::{init_logging, Config, Dispatcher, Error, Flight, Passenger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    run_demo(&config)?;
    Ok(())
}

fn run_demo(config: &Config) -> airdispatch::Result<()> {
    let first = Dispatcher::instance_with(config.flights_path())?;
    let second = Dispatcher::instance()?;
    println!("Same dispatcher: {}", std::ptr::eq(first, second));

    let mut dispatcher = first
        .lock()
        .map_err(|_| Error::internal("dispatcher lock poisoned"))?;

    dispatcher
        .add_flight(Flight::new("SU100", "Москва", "12:30"))
        .add_passenger(Passenger::new("Иван Петров", "123456789"));
    dispatcher
        .add_flight(Flight::new("BA200", "Лондон", "15:45"))
        .add_passenger(Passenger::new("Анна Смирнова", "987654321"));

    print_flights(&dispatcher);

    dispatcher.save_flights()?;
    println!(
        "Flights saved to {}",
        dispatcher.store().path().display()
    );
    Ok(())
}

fn print_flights(dispatcher: &Dispatcher) {
    let mut flights = dispatcher.list_flights().peekable();
    if flights.peek().is_none() {
        println!("No active flights.");
        return;
    }

    println!();
    println!("Active flights:");
    for flight in flights {
        println!("- {flight}");
        for passenger in flight.passengers() {
            println!("    {passenger}");
        }
    }
}

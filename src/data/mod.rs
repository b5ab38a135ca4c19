//! Data layer over the Ergast Formula 1 CSV export.
//!
//! Loads every reference table once at startup into an immutable
//! [`DataStore`] and exposes the queries behind each dashboard view.

mod error;
mod labels;
mod loader;
mod models;
mod queries;
mod rows;
mod store;

pub use models::{LapTime, PitStop};
pub use rows::{
    CircuitLocation, ConstructorStandingRow, CountryRaceCount, DriverStandingRow, PitStopCount,
    QualifyingRow, RaceResultRow, RaceSummary, SeasonRaceCount, SprintResultRow, StatusCount,
};
pub use store::DataStore;

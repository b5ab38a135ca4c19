//! CSV table loader for the Ergast dataset directory.
//!
//! Expected layout: one `<table>.csv` file per table in a single directory,
//! each with a header row and `\N` for missing cells.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::error::{DataError, Result};
use super::models::{
    Circuit, Constructor, ConstructorResult, ConstructorStanding, Driver, DriverStanding, LapTime,
    PitStop, Qualifying, Race, RaceResult, Season, SprintResult, Status,
};

/// Every table the dashboard needs, in load order
pub const TABLE_NAMES: [&str; 14] = [
    "races",
    "results",
    "drivers",
    "driver_standings",
    "constructors",
    "constructor_standings",
    "constructor_results",
    "lap_times",
    "pit_stops",
    "qualifying",
    "seasons",
    "status",
    "sprint_results",
    "circuits",
];

/// All reference tables, fully loaded into memory
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub races: Vec<Race>,
    pub results: Vec<RaceResult>,
    pub drivers: Vec<Driver>,
    pub driver_standings: Vec<DriverStanding>,
    pub constructors: Vec<Constructor>,
    pub constructor_standings: Vec<ConstructorStanding>,
    pub constructor_results: Vec<ConstructorResult>,
    pub lap_times: Vec<LapTime>,
    pub pit_stops: Vec<PitStop>,
    pub qualifying: Vec<Qualifying>,
    pub seasons: Vec<Season>,
    pub status: Vec<Status>,
    pub sprint_results: Vec<SprintResult>,
    pub circuits: Vec<Circuit>,
}

impl Tables {
    /// Load every table from `base_path`.
    ///
    /// Fails on the first missing or unreadable file; nothing is returned
    /// partially loaded.
    pub fn load(base_path: &Path) -> Result<Self> {
        // Check up front so a missing file is reported before any parsing work
        for name in TABLE_NAMES {
            let path = table_path(base_path, name);
            if !path.exists() {
                return Err(DataError::NotFound { path });
            }
        }

        Ok(Tables {
            races: load_table(base_path, "races")?,
            results: load_table(base_path, "results")?,
            drivers: load_table(base_path, "drivers")?,
            driver_standings: load_table(base_path, "driver_standings")?,
            constructors: load_table(base_path, "constructors")?,
            constructor_standings: load_table(base_path, "constructor_standings")?,
            constructor_results: load_table(base_path, "constructor_results")?,
            lap_times: load_table(base_path, "lap_times")?,
            pit_stops: load_table(base_path, "pit_stops")?,
            qualifying: load_table(base_path, "qualifying")?,
            seasons: load_table(base_path, "seasons")?,
            status: load_table(base_path, "status")?,
            sprint_results: load_table(base_path, "sprint_results")?,
            circuits: load_table(base_path, "circuits")?,
        })
    }

    /// Row count of every table, in load order
    pub fn row_counts(&self) -> [(&'static str, usize); 14] {
        [
            ("races", self.races.len()),
            ("results", self.results.len()),
            ("drivers", self.drivers.len()),
            ("driver_standings", self.driver_standings.len()),
            ("constructors", self.constructors.len()),
            ("constructor_standings", self.constructor_standings.len()),
            ("constructor_results", self.constructor_results.len()),
            ("lap_times", self.lap_times.len()),
            ("pit_stops", self.pit_stops.len()),
            ("qualifying", self.qualifying.len()),
            ("seasons", self.seasons.len()),
            ("status", self.status.len()),
            ("sprint_results", self.sprint_results.len()),
            ("circuits", self.circuits.len()),
        ]
    }
}

/// Path of a named table inside the data directory
pub fn table_path(base_path: &Path, name: &str) -> PathBuf {
    base_path.join(format!("{name}.csv"))
}

/// Load a single named table from the data directory
pub fn load_table<T: DeserializeOwned>(base_path: &Path, name: &str) -> Result<Vec<T>> {
    let path = table_path(base_path, name);
    if !path.exists() {
        return Err(DataError::NotFound { path });
    }

    let file = File::open(&path).map_err(|e| DataError::csv(name, e.into()))?;
    let rows = read_table(file, name)?;
    info!(table = name, rows = rows.len(), "Loaded table");
    Ok(rows)
}

/// Parse a table from any reader (used for files and in-memory fixtures)
pub fn read_table<T: DeserializeOwned, R: io::Read>(source: R, name: &str) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);

    // Header problems are structural, so surface them instead of skipping rows
    reader.headers().map_err(|e| DataError::csv(name, e))?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for record in reader.deserialize::<T>() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) if is_row_error(&e) => {
                skipped += 1;
                warn!(table = name, error = %e, "Skipping row with unusable key columns");
            }
            Err(e) => return Err(DataError::csv(name, e)),
        }
    }

    if skipped > 0 {
        warn!(table = name, skipped, "Some rows were skipped");
    }

    Ok(rows)
}

/// Row-level problems are recoverable; I/O failures are not
fn is_row_error(err: &csv::Error) -> bool {
    matches!(
        err.kind(),
        csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::Utf8 { .. }
    )
}

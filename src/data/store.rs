//! Immutable in-memory store over the loaded tables.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use super::error::Result;
use super::loader::Tables;
use super::models::{Circuit, Constructor, Driver};

/// Read-only access to every reference table plus id lookups.
///
/// Built once at startup and only ever borrowed afterwards, so queries can
/// run from any number of views without synchronisation.
#[derive(Debug, Default)]
pub struct DataStore {
    tables: Tables,
    drivers_by_id: HashMap<i64, usize>,
    constructors_by_id: HashMap<i64, usize>,
    circuits_by_id: HashMap<i64, usize>,
    status_by_id: HashMap<i64, String>,
}

impl DataStore {
    /// Load every table from the data directory
    pub fn load(base_path: &Path) -> Result<Self> {
        let tables = Tables::load(base_path)?;
        for (table, rows) in tables.row_counts() {
            debug!(table, rows, "Table row count");
        }
        let store = Self::from_tables(tables);
        info!(
            path = %base_path.display(),
            races = store.tables.races.len(),
            drivers = store.tables.drivers.len(),
            "Data store ready"
        );
        Ok(store)
    }

    /// Wrap already-loaded tables, building the lookup indexes
    pub fn from_tables(tables: Tables) -> Self {
        // First occurrence wins for duplicated ids
        let mut drivers_by_id = HashMap::new();
        for (idx, d) in tables.drivers.iter().enumerate() {
            drivers_by_id.entry(d.driver_id).or_insert(idx);
        }
        let mut constructors_by_id = HashMap::new();
        for (idx, c) in tables.constructors.iter().enumerate() {
            constructors_by_id.entry(c.constructor_id).or_insert(idx);
        }
        let mut circuits_by_id = HashMap::new();
        for (idx, c) in tables.circuits.iter().enumerate() {
            circuits_by_id.entry(c.circuit_id).or_insert(idx);
        }
        let mut status_by_id = HashMap::new();
        for s in &tables.status {
            if let Some(text) = &s.status {
                status_by_id.entry(s.status_id).or_insert_with(|| text.clone());
            }
        }

        DataStore {
            tables,
            drivers_by_id,
            constructors_by_id,
            circuits_by_id,
            status_by_id,
        }
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn driver(&self, driver_id: i64) -> Option<&Driver> {
        self.drivers_by_id
            .get(&driver_id)
            .map(|&idx| &self.tables.drivers[idx])
    }

    pub fn constructor(&self, constructor_id: i64) -> Option<&Constructor> {
        self.constructors_by_id
            .get(&constructor_id)
            .map(|&idx| &self.tables.constructors[idx])
    }

    pub fn circuit(&self, circuit_id: i64) -> Option<&Circuit> {
        self.circuits_by_id
            .get(&circuit_id)
            .map(|&idx| &self.tables.circuits[idx])
    }

    /// Textual status for a status id, if the lookup table has one
    pub fn status_text(&self, status_id: i64) -> Option<&str> {
        self.status_by_id.get(&status_id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::Status;

    #[test]
    fn test_status_lookup_ignores_missing_text() {
        let tables = Tables {
            status: vec![
                Status {
                    status_id: 1,
                    status: Some("Finished".to_string()),
                },
                Status {
                    status_id: 2,
                    status: None,
                },
            ],
            ..Tables::default()
        };
        let store = DataStore::from_tables(tables);

        assert_eq!(store.status_text(1), Some("Finished"));
        assert_eq!(store.status_text(2), None);
        assert_eq!(store.status_text(3), None);
    }

    #[test]
    fn test_duplicate_driver_ids_keep_first() {
        let driver = |code: &str| Driver {
            driver_id: 1,
            code: Some(code.to_string()),
            forename: None,
            surname: None,
            nationality: None,
        };
        let tables = Tables {
            drivers: vec![driver("AAA"), driver("BBB")],
            ..Tables::default()
        };
        let store = DataStore::from_tables(tables);

        assert_eq!(store.driver(1).and_then(|d| d.code.as_deref()), Some("AAA"));
        assert!(store.driver(2).is_none());
    }
}

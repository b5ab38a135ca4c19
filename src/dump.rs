//! Headless JSON export of a single view.

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::DumpConfig;
use crate::data::DataStore;
use crate::views::ViewData;

/// Load the data directory and print the requested view to stdout
pub fn run(config: DumpConfig) -> Result<()> {
    let store = DataStore::load(&config.data_dir).with_context(|| {
        format!(
            "Failed to load Ergast data from {}",
            config.data_dir.display()
        )
    })?;

    println!("{}", render(&store, &config)?);
    Ok(())
}

/// Serialize the view's rows; an empty result is `[]`
pub fn render(store: &DataStore, config: &DumpConfig) -> Result<String> {
    let data = ViewData::compute(store, config.view, &config.selection);
    info!(view = ?config.view, rows = data.len(), "Exporting view");

    let json = if config.pretty {
        serde_json::to_string_pretty(&data)
    } else {
        serde_json::to_string(&data)
    };
    json.context("Failed to serialize view")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{Selection, View};
    use std::path::PathBuf;

    fn config(view: View, selection: Selection) -> DumpConfig {
        DumpConfig {
            data_dir: PathBuf::from("data"),
            view,
            selection,
            pretty: false,
        }
    }

    #[test]
    fn test_render_without_race_is_empty_array() {
        let store = DataStore::default();
        let out = render(&store, &config(View::RaceResults, Selection::default())).unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_run_reports_missing_data_dir() {
        let mut cfg = config(View::Circuits, Selection::default());
        cfg.data_dir = PathBuf::from("/nonexistent/ergast-data");
        let err = run(cfg).unwrap_err();
        assert!(format!("{err:#}").contains("races.csv"));
    }
}

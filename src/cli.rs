//! Command-line interface argument parsing for ergast-tui.
//!
//! - `ergast-tui show --data-dir ./data --year 2021`
//! - `ergast-tui dump driver-standings --year 2021`
//! - `ergast-tui dump lap-times --race 1053 --driver 1 --pretty`

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::views::{Selection, View};

/// Environment variable consulted when `--data-dir` is not given
pub const DATA_DIR_ENV: &str = "ERGAST_DATA_DIR";

/// Directory used when neither the flag nor the environment variable is set
const DEFAULT_DATA_DIR: &str = "data";

/// A terminal dashboard for exploring Formula 1 history from the Ergast dataset.
#[derive(Parser, Debug)]
#[command(name = "ergast-tui")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the TUI dashboard
    Show {
        /// Directory holding the Ergast CSV files
        #[arg(short, long, env = DATA_DIR_ENV)]
        data_dir: Option<PathBuf>,

        /// Season selected on startup (defaults to the latest)
        #[arg(short, long)]
        year: Option<i64>,

        /// Write logs to this file (the terminal belongs to the dashboard)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Print the rows behind one view as JSON
    Dump {
        /// View to export
        #[arg(value_enum)]
        view: View,

        /// Directory holding the Ergast CSV files
        #[arg(short, long, env = DATA_DIR_ENV)]
        data_dir: Option<PathBuf>,

        /// Season filter
        #[arg(short, long)]
        year: Option<i64>,

        /// Race filter (raceId)
        #[arg(short, long)]
        race: Option<i64>,

        /// Driver filter (driverId), used by lap times
        #[arg(long)]
        driver: Option<i64>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Configuration for the dashboard, derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub initial_year: Option<i64>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_show_command(
        data_dir: Option<PathBuf>,
        year: Option<i64>,
        log_file: Option<PathBuf>,
    ) -> Self {
        AppConfig {
            data_dir: resolve_data_dir(data_dir),
            initial_year: year,
            log_file,
        }
    }
}

/// Configuration for a headless export
#[derive(Debug, Clone)]
pub struct DumpConfig {
    pub data_dir: PathBuf,
    pub view: View,
    pub selection: Selection,
    pub pretty: bool,
}

impl DumpConfig {
    pub fn from_dump_command(
        view: View,
        data_dir: Option<PathBuf>,
        year: Option<i64>,
        race: Option<i64>,
        driver: Option<i64>,
        pretty: bool,
    ) -> Self {
        DumpConfig {
            data_dir: resolve_data_dir(data_dir),
            view,
            selection: Selection {
                year,
                race_id: race,
                driver_id: driver,
            },
            pretty,
        }
    }
}

/// Flag (or environment, via clap) first, then `./data`
fn resolve_data_dir(data_dir: Option<PathBuf>) -> PathBuf {
    data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::from_show_command(None, None, None);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.initial_year, None);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_parse_dump_command() {
        let cli = Cli::try_parse_from([
            "ergast-tui",
            "dump",
            "lap-times",
            "--data-dir",
            "/tmp/f1",
            "--race",
            "18",
            "--driver",
            "1",
        ])
        .unwrap();

        let Commands::Dump {
            view,
            data_dir,
            year,
            race,
            driver,
            pretty,
        } = cli.command
        else {
            panic!("expected dump command");
        };
        let config = DumpConfig::from_dump_command(view, data_dir, year, race, driver, pretty);

        assert_eq!(config.view, View::LapTimes);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/f1"));
        assert_eq!(config.selection.race_id, Some(18));
        assert_eq!(config.selection.driver_id, Some(1));
        assert_eq!(config.selection.year, None);
        assert!(!config.pretty);
    }

    #[test]
    fn test_unknown_view_is_rejected() {
        assert!(Cli::try_parse_from(["ergast-tui", "dump", "weather"]).is_err());
    }
}

//! ergast-tui: a terminal dashboard over the Ergast Formula 1 dataset.
//!
//! Loads the CSV export once at startup and offers keyboard-driven views of
//! championship standings, race results, lap times, pit stops, sprints and
//! season history. `dump` prints the same views as JSON.

mod app;
mod cli;
mod data;
mod dump;
mod logging;
mod ui;
mod views;

use anyhow::Result;
use cli::{AppConfig, Cli, Commands, DumpConfig};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Show {
            data_dir,
            year,
            log_file,
        } => {
            let config = AppConfig::from_show_command(data_dir, year, log_file);
            if let Some(path) = &config.log_file {
                logging::init_file(path)?;
            }

            app::run(config)?;
        }
        Commands::Dump {
            view,
            data_dir,
            year,
            race,
            driver,
            pretty,
        } => {
            logging::init_stderr();
            let config = DumpConfig::from_dump_command(view, data_dir, year, race, driver, pretty);

            dump::run(config)?;
        }
    }

    Ok(())
}

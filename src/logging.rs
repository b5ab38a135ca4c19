//! Tracing subscriber setup.
//!
//! The filter comes from `RUST_LOG` and defaults to `info`.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to stderr (headless commands)
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log to a file, leaving the terminal to the dashboard
pub fn init_file(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

//! Logging init: append to a file under the XDG state dir, or fall back to stderr.

use anyhow::{anyhow, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,appswitch=debug,appswitch_core=debug";

/// Initialize structured logging to `~/.local/state/appswitch/appswitch.log`
/// and return the log file path.
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall back to stderr.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = open_log_file(&path)?;
    // `&File` is `Write`, so one shared handle serves every event.
    install(Arc::new(file))?;
    tracing::info!(path = %path.display(), "appswitch logging initialized");
    Ok(path)
}

/// Initialize logging to stderr only. Use when init_logging() fails so the CLI keeps working.
/// A subscriber that is already installed is left in place.
pub fn init_logging_stderr() {
    if install(io::stderr).is_err() {
        tracing::debug!("subscriber already installed; stderr fallback skipped");
    }
}

/// Location of the log file under the XDG state dir.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("appswitch")?;
    Ok(xdg_dirs.get_state_home().join("appswitch.log"))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::OpenOptions::new().create(true).append(true).open(path)
}

fn install<W>(writer: W) -> Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("install tracing subscriber: {e}"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

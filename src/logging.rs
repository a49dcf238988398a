//! Logging setup
//!
//! stdout belongs to the protocol, so log records go to a file under the
//! user's data directory, or to stderr when that file cannot be opened.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Log file name inside the log directory
pub const LOG_FILE: &str = "hcloud-mcp.log";

/// `<data_local_dir>/hcloud-mcp/logs`
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hcloud-mcp")
        .join("logs")
}

/// Create `dir` if needed and open the log file in append mode
pub fn open_log_file(dir: &Path) -> Result<(PathBuf, File)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

/// Initialise env_logger (honours `RUST_LOG`).
///
/// Returns the log file path, or `None` when logging fell back to stderr.
pub fn init(dir: &Path) -> Option<PathBuf> {
    let mut builder = env_logger::Builder::from_default_env();
    let path = match open_log_file(dir) {
        Ok((path, file)) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            Some(path)
        }
        Err(_) => {
            builder.target(env_logger::Target::Stderr);
            None
        }
    };

    if builder.try_init().is_err() {
        log::debug!("Logger already initialised");
    }
    path
}

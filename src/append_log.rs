use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

pub const APPEND_LINE: &str = "hello world!";
pub const DEFAULT_APPEND_PATH: &str = "/tmp/record-simulator.log";

pub fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_APPEND_PATH)
}

/// Appends `line` plus a newline to `path`, creating the file if needed and syncing before return.
///
/// The parent directory is never created; a missing or read-only directory is an error.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("unable to open {} for append", path.display()))?;
    let mut buffer = String::with_capacity(line.len() + 1);
    buffer.push_str(line);
    buffer.push('\n');
    file.write_all(buffer.as_bytes())
        .with_context(|| format!("unable to append to {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("unable to sync {}", path.display()))?;
    info!(path = %path.display(), "appended log line");
    Ok(())
}

use std::io::Read;

use anyhow::{Context, Result};
use tracing::debug;

/// Reads the whole stream as UTF-8 text. An immediately closed stream yields an empty string.
pub fn read_input<R>(mut reader: R) -> Result<String>
where
    R: Read,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("unable to read standard input")?;
    debug!(bytes = text.len(), "captured input");
    Ok(text)
}

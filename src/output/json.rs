//! JSON output formatting

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, TreeError};

/// Print any serializable value as pretty-printed JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

/// Write `value` as pretty-printed JSON to `path`.
pub fn write_json_file<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TreeError::io(parent, e))?;
    }
    fs::write(path, json).map_err(|e| TreeError::io(path, e))
}

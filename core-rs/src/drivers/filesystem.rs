//! Filesystem helpers for query files, configs and the report
//!
//! Read errors distinguish a missing file (`SmwError::FileNotFound`) from
//! other I/O failures; writes replace the file and create parent
//! directories.

use crate::errors::{Result, SmwError};
use std::fs;
use std::io;
use std::path::Path;

/// Read a UTF-8 text file
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SmwError::FileNotFound(path.display().to_string()),
        _ => SmwError::Io(e),
    })
}

/// Write `content` to `path`, overwriting any previous file
pub fn write_text(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

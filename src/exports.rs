//! Schema export
//!
//! Writes a rendered schema to its target path. The text goes to a sibling
//! temporary file first and is renamed into place, so a failed write never
//! leaves a truncated schema behind.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::error;

use crate::error::{Error, Result};

/// Result of a schema export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Path of the written schema
    pub path: PathBuf,
    /// Number of bytes written
    pub bytes: usize,
}

/// Temporary path next to the target
fn staging_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(target.file_name().unwrap_or_else(|| std::ffi::OsStr::new("schema.xsd")));
    name.push(".tmp");
    target.with_file_name(name)
}

fn write_staged(target: &Path, staging: &Path, text: &str) -> std::io::Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(staging, text)?;
    fs::rename(staging, target)
}

/// Write schema text to a file
pub fn export_schema(target: impl AsRef<Path>, text: &str) -> Result<ExportResult> {
    let target = target.as_ref();
    let staging = staging_path(target);

    if let Err(source) = write_staged(target, &staging, text) {
        let _ = fs::remove_file(&staging);
        error!("Error while writing XSD to {}: {}", target.display(), source);
        return Err(Error::Output {
            path: target.to_path_buf(),
            source,
        });
    }

    Ok(ExportResult {
        path: target.to_path_buf(),
        bytes: text.len(),
    })
}

//! Packaging rendered codes into files.
//!
//! | Output | Builder | Crate |
//! |---|---|---|
//! | `qrcodes_<ts>.zip` | [`build_archive`] | `zip` (deflate) |
//! | `qrcodes_<ts>.xlsx` | [`build_workbook`] | `rust_xlsxwriter` |
//! | `qrcodes_<ts>/` | [`write_png_dir`] | std `fs` |
//! | `qrcode_<id>_<ts>.png` | [`write_file`] | std `fs` |
//!
//! Builders return bytes so they can be tested without touching disk;
//! [`write_file`] puts them in place.

mod archive;
mod workbook;

pub use archive::build_archive;
pub use workbook::build_workbook;

use crate::naming::entry_name;
use crate::types::QrEntry;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("No QR codes to package")]
    Empty,
    #[error("Duplicate ID in output: {0}")]
    DuplicateEntry(String),
}

/// Reject empty input and IDs that would collide as `<id>.png`.
fn check_entries(entries: &[QrEntry]) -> Result<(), PackageError> {
    if entries.is_empty() {
        return Err(PackageError::Empty);
    }
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.id.as_str()) {
            return Err(PackageError::DuplicateEntry(entry.id.clone()));
        }
    }
    Ok(())
}

/// Write `bytes` to `dir/name`, creating `dir` if needed.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, PackageError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, bytes)?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

/// Write every entry as `<id>.png` into `dir`.
pub fn write_png_dir(dir: &Path, entries: &[QrEntry]) -> Result<Vec<PathBuf>, PackageError> {
    check_entries(entries)?;
    fs::create_dir_all(dir)?;
    let mut paths = Vec::with_capacity(entries.len());
    for entry in entries {
        let path = dir.join(entry_name(&entry.id));
        fs::write(&path, &entry.png)?;
        paths.push(path);
    }
    log::info!("wrote {} PNG files to {}", paths.len(), dir.display());
    Ok(paths)
}

//! ZIP archive of `<id>.png` entries.

use super::{PackageError, check_entries};
use crate::naming::entry_name;
use crate::types::QrEntry;
use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Build an in-memory ZIP with one deflated `<id>.png` per entry, in order.
pub fn build_archive(entries: &[QrEntry]) -> Result<Vec<u8>, PackageError> {
    check_entries(entries)?;

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in entries {
        writer.start_file(entry_name(&entry.id), options)?;
        writer.write_all(&entry.png)?;
    }
    let bytes = writer.finish()?.into_inner();

    log::debug!("archive: {} entries, {} bytes", entries.len(), bytes.len());
    Ok(bytes)
}

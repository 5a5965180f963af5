//! Batch input parsing.
//!
//! Two formats are accepted:
//!
//! ```text
//! plain text            CSV (header row required)
//! ----------            -------------------------
//! 1001                  id,name
//! 1002                  1001,Alice
//! 1003                  1002,Bob
//! ```
//!
//! Any comma anywhere in the input switches to CSV mode. In CSV mode the
//! first line is always treated as a header, rows whose first column is not
//! purely numeric are dropped, and a missing name column falls back to
//! [`DEFAULT_NAME`]. Plain text keeps every non-blank line so that invalid
//! IDs reach the validator and get reported instead of vanishing.

use crate::types::{DEFAULT_NAME, Record};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Detected input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Plain,
}

/// Decide the format from raw text.
pub fn detect_format(text: &str) -> InputFormat {
    if text.contains(',') {
        InputFormat::Csv
    } else {
        InputFormat::Plain
    }
}

/// Parse batch input in whichever format it looks like.
pub fn parse_batch(text: &str) -> Vec<Record> {
    let text = text.trim();
    let format = detect_format(text);
    log::debug!("batch input detected as {:?}", format);
    let records = match format {
        InputFormat::Csv => parse_csv(text),
        InputFormat::Plain => parse_plain(text),
    };
    log::debug!("parsed {} records", records.len());
    records
}

/// Parse `id,name` CSV with a header row.
pub fn parse_csv(text: &str) -> Vec<Record> {
    let mut records = Vec::new();

    for (line_no, line) in text.trim().lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut columns = line.split(',');
        let id = columns.next().unwrap_or_default().trim();
        let name = columns.next().map(str::trim).unwrap_or_default();

        if !is_numeric_id(id) {
            log::debug!("skipping CSV line {}: non-numeric id {:?}", line_no + 1, id);
            continue;
        }

        let name = if name.is_empty() { DEFAULT_NAME } else { name };
        records.push(Record::new(id, name));
    }

    records
}

/// Parse one ID per line.
pub fn parse_plain(text: &str) -> Vec<Record> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Record::unnamed)
        .collect()
}

/// `^\d+$` over ASCII digits.
pub fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Read input text from a file, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, InputError> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| InputError::Io {
                path: "<stdin>".to_string(),
                source,
            })?;
        return Ok(text);
    }

    std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })
}

//! Shared types passed between pipeline stages.
//!
//! A batch run turns a list of [`Record`]s into a list of [`QrEntry`]s. Both
//! live only in memory for the duration of one run.

use serde::{Deserialize, Serialize};

/// Name used when the input has no name column or the cell is empty.
pub const DEFAULT_NAME: &str = "Unknown";

/// One input row: an identifier and an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,
}

impl Record {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Record with the default name.
    pub fn unnamed(id: impl Into<String>) -> Self {
        Self::new(id, DEFAULT_NAME)
    }
}

/// A rendered QR code ready for packaging.
#[derive(Debug, Clone, Serialize)]
pub struct QrEntry {
    pub id: String,
    pub name: String,
    /// PNG-encoded image (labeled unless labels are disabled).
    #[serde(skip)]
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl QrEntry {
    /// Size of the encoded PNG in bytes.
    pub fn byte_len(&self) -> usize {
        self.png.len()
    }
}

//! Shared test utilities.
//!
//! [`entry`] renders a real labeled QR through [`RustBackend`], so packaging
//! tests work with genuine, distinct PNG payloads.

use crate::batch::generate_single;
use crate::config::ToolConfig;
use crate::imaging::RustBackend;
use crate::types::{DEFAULT_NAME, QrEntry};

/// A rendered entry for `id` with the default config and name.
pub fn entry(id: &str) -> QrEntry {
    let entry = generate_single(&RustBackend::new(), id, &ToolConfig::default()).unwrap();
    assert_eq!(entry.name, DEFAULT_NAME);
    entry
}

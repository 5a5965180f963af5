//! High-level image operations.
//!
//! These functions combine parameters, the backend and the label compositor.
//! They take configuration, build parameters, and call the backend.

use super::backend::{BackendError, QrBackend};
use super::label::compose_label;
use super::params::{LabelParams, QrParams};
use crate::config::ToolConfig;
use image::{ImageFormat, RgbImage};
use std::io::Cursor;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Render the QR for `id` and, if enabled, its label band.
pub fn render_labeled(backend: &impl QrBackend, id: &str, config: &ToolConfig) -> Result<RgbImage> {
    let qr = backend.render(&QrParams::from_config(id, config))?;
    Ok(match LabelParams::from_config(id, config) {
        Some(label) => compose_label(&qr, &label),
        None => qr,
    })
}

/// Encode an image as PNG bytes.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

//! QR rendering backend trait and shared types.
//!
//! The [`QrBackend`] trait is the seam between the pipeline and the actual
//! QR encoder. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `qrcode`
//! crate. Tests swap in a recording mock so pipeline logic can be checked
//! without encoding anything.

use super::params::QrParams;
use image::RgbImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("QR encoding failed for {data:?}: {message}")]
    Encode { data: String, message: String },
    #[error("QR code needs {modules} modules but the image is only {size}px wide")]
    TooSmall { modules: u32, size: u32 },
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Trait for QR rendering backends.
pub trait QrBackend: Sync {
    /// Render the bare QR square described by `params` (`size × size`).
    fn render(&self, params: &QrParams) -> Result<RgbImage, BackendError>;
}

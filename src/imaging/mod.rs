//! Image work in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Encode QR** | `qrcode` module matrix, integer-scaled into an `RgbImage` |
//! | **Label** | `font8x8` glyphs drawn into a band under the code |
//! | **PNG** | `image` crate PNG encoder |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for layout math (unit testable)
//! - **Parameters**: Data structures describing what to draw
//! - **Backend**: [`QrBackend`] trait + [`RustBackend`]
//! - **Label**: Canvas compositing for the ID text
//! - **Operations**: High-level functions combining the above

pub mod backend;
pub mod calculations;
mod label;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, QrBackend};
pub use label::{compose_label, draw_text};
pub use operations::{encode_png, render_labeled};
pub use params::{LabelParams, QrParams};
pub use rust_backend::{RustBackend, terminal_preview};

//! Parameter types for image operations.
//!
//! These structs describe *what* to draw, not *how*. They sit between the
//! high-level [`operations`](super::operations) module and the
//! [`backend`](super::backend), which does the pixel work.

use crate::config::{EcLevel, ToolConfig};
use image::Rgb;

/// Everything needed to render one bare QR square.
#[derive(Debug, Clone, PartialEq)]
pub struct QrParams {
    /// Text to encode.
    pub data: String,
    /// Output side length in pixels.
    pub size: u32,
    /// Quiet zone in modules.
    pub margin: u32,
    pub ec_level: EcLevel,
    pub dark: Rgb<u8>,
    pub light: Rgb<u8>,
}

impl QrParams {
    pub fn from_config(data: &str, config: &ToolConfig) -> Self {
        Self {
            data: data.to_string(),
            size: config.qr.size,
            margin: config.qr.margin,
            ec_level: config.qr.ec_level,
            dark: config.dark_rgb(),
            light: config.light_rgb(),
        }
    }
}

/// Text band drawn under the QR square.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelParams {
    /// Full label text, prefix included.
    pub text: String,
    pub band_height: u32,
    pub max_scale: u32,
    pub dark: Rgb<u8>,
    pub light: Rgb<u8>,
}

impl LabelParams {
    /// `None` when labels are disabled.
    pub fn from_config(id: &str, config: &ToolConfig) -> Option<Self> {
        if !config.label.enabled {
            return None;
        }
        Some(Self {
            text: format!("{}{}", config.label.prefix, id),
            band_height: config.label.band_height,
            max_scale: config.label.max_scale,
            dark: config.dark_rgb(),
            light: config.light_rgb(),
        })
    }
}

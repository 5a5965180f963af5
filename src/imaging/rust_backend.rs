//! Pure Rust QR backend built on the `qrcode` crate.
//!
//! | Step | Crate / function |
//! |---|---|
//! | Encode data → module matrix | `qrcode::QrCode::with_error_correction_level` |
//! | Matrix → pixels | integer module scaling via [`fit_modules`] |
//! | Terminal preview | `qrcode::render::unicode::Dense1x2` |

use super::backend::{BackendError, QrBackend};
use super::calculations::fit_modules;
use super::params::QrParams;
use crate::config::EcLevel;
use image::RgbImage;
use qrcode::render::unicode::Dense1x2;
use qrcode::{Color, QrCode};

/// Production backend. Stateless; one instance is shared across workers.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn to_qrcode_level(level: EcLevel) -> qrcode::EcLevel {
    match level {
        EcLevel::L => qrcode::EcLevel::L,
        EcLevel::M => qrcode::EcLevel::M,
        EcLevel::Q => qrcode::EcLevel::Q,
        EcLevel::H => qrcode::EcLevel::H,
    }
}

fn encode(data: &str, level: EcLevel) -> Result<QrCode, BackendError> {
    QrCode::with_error_correction_level(data.as_bytes(), to_qrcode_level(level)).map_err(|e| {
        BackendError::Encode {
            data: data.to_string(),
            message: e.to_string(),
        }
    })
}

impl QrBackend for RustBackend {
    fn render(&self, params: &QrParams) -> Result<RgbImage, BackendError> {
        let code = encode(&params.data, params.ec_level)?;
        let width = code.width() as u32;
        let modules = width + 2 * params.margin;
        let layout = fit_modules(modules, params.size).ok_or(BackendError::TooSmall {
            modules,
            size: params.size,
        })?;

        let mut img = RgbImage::from_pixel(params.size, params.size, params.light);
        let origin = layout.offset + params.margin * layout.module_px;

        for (i, color) in code.to_colors().iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let mx = i as u32 % width;
            let my = i as u32 / width;
            let x0 = origin + mx * layout.module_px;
            let y0 = origin + my * layout.module_px;
            for dy in 0..layout.module_px {
                for dx in 0..layout.module_px {
                    img.put_pixel(x0 + dx, y0 + dy, params.dark);
                }
            }
        }

        Ok(img)
    }
}

/// Render `data` as Unicode half-block art for terminal display.
///
/// Colors are inverted so the code reads correctly on dark terminals.
pub fn terminal_preview(data: &str, level: EcLevel) -> Result<String, BackendError> {
    let code = encode(data, level)?;
    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolConfig;
    use image::Rgb;

    fn params(data: &str) -> QrParams {
        QrParams::from_config(data, &ToolConfig::default())
    }

    #[test]
    fn render_produces_square_of_requested_size() {
        let img = RustBackend::new().render(&params("1001")).unwrap();
        assert_eq!(img.dimensions(), (256, 256));
    }

    #[test]
    fn render_has_light_border_and_dark_finder() {
        let img = RustBackend::new().render(&params("1001")).unwrap();
        // Version 1: 25 modules incl. margin → 10px modules, offset 3.
        // Quiet zone spans offset + 2 modules = 23px.
        assert_eq!(*img.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*img.get_pixel(22, 22), Rgb([255, 255, 255]));
        // Top-left finder pattern's outer ring starts right after.
        assert_eq!(*img.get_pixel(23, 23), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(255, 255), Rgb([255, 255, 255]));
    }

    #[test]
    fn render_uses_configured_colors() {
        let mut p = params("7");
        p.dark = Rgb([10, 20, 30]);
        p.light = Rgb([200, 210, 220]);
        let img = RustBackend::new().render(&p).unwrap();
        assert_eq!(*img.get_pixel(0, 0), Rgb([200, 210, 220]));
        assert_eq!(*img.get_pixel(23, 23), Rgb([10, 20, 30]));
    }

    #[test]
    fn render_max_length_id_fits_default_size() {
        let id = "A".repeat(50);
        assert!(RustBackend::new().render(&params(&id)).is_ok());
    }

    #[test]
    fn render_too_small_is_error() {
        let mut p = params("1001");
        p.size = 21;
        assert!(matches!(
            RustBackend::new().render(&p),
            Err(BackendError::TooSmall {
                modules: 25,
                size: 21
            })
        ));
    }

    #[test]
    fn render_oversized_data_is_encode_error() {
        let data = "9".repeat(8000);
        assert!(matches!(
            RustBackend::new().render(&params(&data)),
            Err(BackendError::Encode { .. })
        ));
    }

    #[test]
    fn terminal_preview_has_rows() {
        let art = terminal_preview("1001", EcLevel::M).unwrap();
        assert!(art.lines().count() > 10);
    }
}

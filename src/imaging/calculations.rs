//! Pure layout math for QR squares and labels.
//!
//! All functions here are pure and testable without any images.

/// Width and height of one bitmap glyph before scaling.
pub const GLYPH_SIZE: u32 = 8;

/// Horizontal padding kept free on each side of the label.
pub const LABEL_PADDING: u32 = 4;

/// Placement of the module grid inside the square output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleLayout {
    /// Side length of one module in pixels.
    pub module_px: u32,
    /// Offset of the first module (quiet zone included) from the image edge.
    pub offset: u32,
}

/// Fit `modules` (quiet zone included) into a `size`-pixel square.
///
/// Modules are integer-sized so edges stay crisp; the leftover pixels are
/// split evenly around the grid. Returns `None` when not even one pixel per
/// module fits.
///
/// ```
/// # use qr_label::imaging::calculations::{fit_modules, ModuleLayout};
/// // Version 1 (21 modules) + 2-module margin on each side → 25 modules.
/// assert_eq!(fit_modules(25, 256), Some(ModuleLayout { module_px: 10, offset: 3 }));
/// ```
pub fn fit_modules(modules: u32, size: u32) -> Option<ModuleLayout> {
    if modules == 0 || modules > size {
        return None;
    }
    let module_px = size / modules;
    let offset = (size - modules * module_px) / 2;
    Some(ModuleLayout { module_px, offset })
}

/// Pick the largest glyph scale in `1..=max_scale` at which `chars` glyphs
/// fit into `canvas_width` minus padding and one glyph row fits into
/// `band_height`. Never returns less than 1; text that still does not fit
/// gets clipped by the caller.
pub fn label_scale(chars: usize, canvas_width: u32, band_height: u32, max_scale: u32) -> u32 {
    let max_scale = max_scale.min(band_height / GLYPH_SIZE);
    let available = canvas_width.saturating_sub(2 * LABEL_PADDING) as u64;
    let per_glyph = GLYPH_SIZE as u64 * chars as u64;
    if per_glyph == 0 {
        return max_scale.max(1);
    }
    let fitting = (available / per_glyph).min(max_scale as u64) as u32;
    fitting.max(1)
}

/// Vertical center of the label inside the band under a `size`-pixel QR.
///
/// Sits at 3/8 of the band, which puts it at `256 + 24` for the default
/// 256px square and 64px band.
pub fn label_center_y(size: u32, band_height: u32) -> u32 {
    size + band_height * 3 / 8
}

/// Top-left corner for a `text_w × text_h` block centered horizontally on
/// the canvas and vertically on `center_y`. May be negative when the text
/// is wider than the canvas.
pub fn text_origin(text_w: u32, text_h: u32, canvas_width: u32, center_y: u32) -> (i64, i64) {
    let x = (canvas_width as i64 - text_w as i64) / 2;
    let y = center_y as i64 - text_h as i64 / 2;
    (x, y)
}

/// Scale `(width, height)` down to fit inside `(max_w, max_h)`, keeping the
/// aspect ratio. Returns the scale factor (never above 1.0).
pub fn fit_scale(width: u32, height: u32, max_w: u32, max_h: u32) -> f64 {
    if width == 0 || height == 0 {
        return 1.0;
    }
    let sx = max_w as f64 / width as f64;
    let sy = max_h as f64 / height as f64;
    sx.min(sy).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_modules_centers_grid() {
        assert_eq!(
            fit_modules(25, 256),
            Some(ModuleLayout {
                module_px: 10,
                offset: 3
            })
        );
        // Version 4 + margin: 37 modules → 6px each, 34px leftover.
        assert_eq!(
            fit_modules(37, 256),
            Some(ModuleLayout {
                module_px: 6,
                offset: 17
            })
        );
    }

    #[test]
    fn fit_modules_exact() {
        assert_eq!(
            fit_modules(25, 25),
            Some(ModuleLayout {
                module_px: 1,
                offset: 0
            })
        );
    }

    #[test]
    fn fit_modules_too_small() {
        assert_eq!(fit_modules(30, 25), None);
        assert_eq!(fit_modules(0, 25), None);
    }

    #[test]
    fn label_scale_short_text_uses_max() {
        // "ID: 1001" = 8 chars → 64px per scale unit, 248 available → 3.
        assert_eq!(label_scale(8, 256, 64, 5), 3);
        assert_eq!(label_scale(4, 256, 64, 5), 5);
    }

    #[test]
    fn label_scale_long_text_falls_to_one() {
        assert_eq!(label_scale(54, 256, 64, 5), 1);
    }

    #[test]
    fn label_scale_respects_max() {
        assert_eq!(label_scale(2, 256, 64, 2), 2);
    }

    #[test]
    fn label_scale_empty_text() {
        assert_eq!(label_scale(0, 256, 64, 5), 5);
    }

    #[test]
    fn label_scale_capped_by_band() {
        assert_eq!(label_scale(2, 256, 16, 5), 2);
        assert_eq!(label_scale(2, 256, 23, 5), 2);
        assert_eq!(label_scale(2, 256, 8, 5), 1);
        assert_eq!(label_scale(0, 256, 16, 5), 2);
    }

    #[test]
    fn label_center_default() {
        assert_eq!(label_center_y(256, 64), 280);
    }

    #[test]
    fn text_origin_centered() {
        assert_eq!(text_origin(200, 40, 256, 280), (28, 260));
    }

    #[test]
    fn text_origin_overflow_is_negative() {
        assert_eq!(text_origin(300, 8, 256, 280), (-22, 276));
    }

    #[test]
    fn fit_scale_keeps_aspect() {
        let s = fit_scale(256, 320, 100, 140);
        assert!((s - 100.0 / 256.0).abs() < 1e-9);
        assert!((320.0 * s) <= 140.0);
    }

    #[test]
    fn fit_scale_never_upscales() {
        assert_eq!(fit_scale(50, 50, 100, 140), 1.0);
    }
}

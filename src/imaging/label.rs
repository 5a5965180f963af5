//! Label compositing: put the QR square on a taller canvas and draw the ID
//! text in the band underneath.
//!
//! Text uses the 8×8 `font8x8` bitmap glyphs, scaled by a whole number so the
//! result stays sharp in print. Characters without a glyph render as `?`.

use super::calculations::{GLYPH_SIZE, label_center_y, label_scale, text_origin};
use super::params::LabelParams;
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage, imageops};

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Compose `qr` (square) with a label band below it.
///
/// The output is `qr.width() × (qr.height() + band_height)`, filled with the
/// light color, with the QR at the top-left and the text centered in the band.
/// Text is drawn into the band alone, so it never touches the QR square.
pub fn compose_label(qr: &RgbImage, params: &LabelParams) -> RgbImage {
    let (width, qr_height) = qr.dimensions();
    let mut canvas = RgbImage::from_pixel(width, qr_height + params.band_height, params.light);
    imageops::replace(&mut canvas, qr, 0, 0);

    let mut band = RgbImage::from_pixel(width, params.band_height, params.light);
    let chars = params.text.chars().count();
    let scale = label_scale(chars, width, params.band_height, params.max_scale);
    let text_w = chars as u32 * GLYPH_SIZE * scale;
    let text_h = GLYPH_SIZE * scale;
    let (x, y) = text_origin(text_w, text_h, width, label_center_y(0, params.band_height));
    draw_text(&mut band, &params.text, x, y, scale, params.dark);
    imageops::replace(&mut canvas, &band, 0, qr_height as i64);

    canvas
}

/// Draw `text` with its top-left corner at `(x, y)`. Pixels outside the
/// canvas are clipped.
pub fn draw_text(canvas: &mut RgbImage, text: &str, x: i64, y: i64, scale: u32, color: Rgb<u8>) {
    let step = (GLYPH_SIZE * scale) as i64;
    for (i, c) in text.chars().enumerate() {
        draw_glyph(canvas, glyph(c), x + i as i64 * step, y, scale, color);
    }
}

fn draw_glyph(canvas: &mut RgbImage, rows: [u8; 8], x: i64, y: i64, scale: u32, color: Rgb<u8>) {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let s = scale as i64;
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..8 {
            // Bit 0 is the leftmost pixel.
            if bits & (1 << col) == 0 {
                continue;
            }
            let px0 = x + col as i64 * s;
            let py0 = y + row as i64 * s;
            for py in py0.max(0)..(py0 + s).min(h) {
                for px in px0.max(0)..(px0 + s).min(w) {
                    canvas.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}

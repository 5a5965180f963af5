//! Excel workbook with one row per code and the image embedded in column B.
//!
//! ```text
//! | ID   | QR Code  | Name  |
//! |------|----------|-------|
//! | 1001 | [image]  | Alice |   row height 140pt
//! ```

use super::PackageError;
use crate::config::WorkbookConfig;
use crate::imaging::calculations::fit_scale;
use crate::types::QrEntry;
use rust_xlsxwriter::{Color, Format, Image, Workbook};

const HEADER_FILL: u32 = 0xE0E0E0;

/// Column headers and widths (in character units).
const COLUMNS: [(&str, f64); 3] = [("ID", 15.0), ("QR Code", 30.0), ("Name", 25.0)];

const ID_COL: u16 = 0;
const IMAGE_COL: u16 = 1;
const NAME_COL: u16 = 2;

/// Build an in-memory `.xlsx` with a header row and one row per entry.
///
/// IDs are written as text so leading zeros survive. Images are scaled to
/// fit the configured box without distorting the aspect ratio. Repeated IDs
/// get one row each; rows have no file names to collide.
pub fn build_workbook(entries: &[QrEntry], config: &WorkbookConfig) -> Result<Vec<u8>, PackageError> {
    if entries.is_empty() {
        return Err(PackageError::Empty);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&config.sheet_name)?;

    let header = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL));
    worksheet.set_row_format(0, &header)?;
    for (col, (title, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, *width)?;
        worksheet.write_string_with_format(0, col, *title, &header)?;
    }

    for (i, entry) in entries.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.set_row_height(row, config.row_height)?;
        worksheet.write_string(row, ID_COL, &entry.id)?;
        worksheet.write_string(row, NAME_COL, &entry.name)?;

        let scale = fit_scale(
            entry.width,
            entry.height,
            config.image_width,
            config.image_height,
        );
        let image = Image::new_from_buffer(&entry.png)?
            .set_scale_width(scale)
            .set_scale_height(scale);
        worksheet.insert_image(row, IMAGE_COL, &image)?;
    }

    let bytes = workbook.save_to_buffer()?;
    log::debug!("workbook: {} rows, {} bytes", entries.len(), bytes.len());
    Ok(bytes)
}

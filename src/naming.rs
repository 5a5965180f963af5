//! Output file naming.
//!
//! Every downloadable file embeds a minute-resolution local timestamp so
//! repeated runs do not overwrite each other:
//!
//! - `qrcode_1001_20260119_0930.png`: single code
//! - `qrcodes_20260119_0930.zip`: batch archive
//! - `qrcodes_20260119_0930.xlsx`: batch workbook
//!
//! Inside archives and PNG directories each code is simply `<id>.png`.

use chrono::{Local, NaiveDateTime};

/// Format a timestamp as `YYYYMMDD_HHMM`.
pub fn timestamp(at: NaiveDateTime) -> String {
    at.format("%Y%m%d_%H%M").to_string()
}

/// Current local time as `YYYYMMDD_HHMM`.
pub fn now_timestamp() -> String {
    timestamp(Local::now().naive_local())
}

pub fn single_png_name(id: &str, stamp: &str) -> String {
    format!("qrcode_{id}_{stamp}.png")
}

pub fn archive_name(stamp: &str) -> String {
    format!("qrcodes_{stamp}.zip")
}

pub fn workbook_name(stamp: &str) -> String {
    format!("qrcodes_{stamp}.xlsx")
}

/// Directory name used for loose PNG output.
pub fn png_dir_name(stamp: &str) -> String {
    format!("qrcodes_{stamp}")
}

/// Entry name for one code inside an archive or directory.
pub fn entry_name(id: &str) -> String {
    format!("{id}.png")
}

//! # qr-label
//!
//! Turns identifiers into printable QR code labels. One ID becomes one PNG;
//! a list of IDs (plain text or `id,name` CSV) becomes a ZIP archive, an
//! Excel workbook with the images embedded, a directory of PNGs, or any mix
//! of these.
//!
//! # Pipeline
//!
//! ```text
//! text ─▶ input::parse_batch ─▶ validate ─▶ batch::generate_batch ─▶ package
//!                                                 │
//!                                  imaging: QR ─▶ label band ─▶ PNG
//! ```
//!
//! Each stage is a plain function over in-memory values; only `package`
//! and the CLI touch the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`input`] | Plain-text / CSV parsing into [`types::Record`]s |
//! | [`validate`] | ID rules and batch limits |
//! | [`imaging`] | QR rendering backend, label compositing, PNG encoding |
//! | [`batch`] | Single and batch generation with progress events |
//! | [`package`] | ZIP, XLSX and PNG-directory output |
//! | [`preview`] | Self-contained HTML preview of a batch |
//! | [`naming`] | Timestamped output file names |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//! | [`types`] | Records and rendered entries shared between stages |
//!
//! # Design Decisions
//!
//! ## Batch IDs Are Numeric, Single IDs Are Tags
//!
//! A single ID may use letters, digits, `-` and `_`. Batch input is meant for
//! record numbers exported from another system, so batch IDs must be all
//! digits; CSV rows that are not are dropped at parse time, plain-text lines
//! that are not reject the whole batch so the user sees them.
//!
//! ## Bitmap Label Font
//!
//! The label is drawn with 8×8 bitmap glyphs scaled by a whole number. No
//! font file ships with the binary and the text stays crisp at any print
//! size. Long IDs shrink to the largest scale that fits.
//!
//! ## Parallel Rendering, Ordered Results
//!
//! Batches render on a rayon pool. Results keep input order and progress
//! events count up strictly, so output looks sequential.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod input;
pub mod naming;
pub mod output;
pub mod package;
pub mod preview;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;

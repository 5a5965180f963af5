//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Records (csv)
//! 001 1001 Alice
//! 002 1002 Bob
//! 2 records valid
//! ```
//!
//! ## Batch progress
//!
//! ```text
//! Generating 3 QR codes
//!   [ 33%] Generated: 1001 (Alice) (1/3)
//!   [ 67%] Generated: 1002 (Bob) (2/3)
//!   [100%] Generated: 1003 (Unknown) (3/3)
//! QR generation complete (3/3)
//! ```
//!
//! ## Batch summary
//!
//! ```text
//! Generated 3 QR codes (14.2 KB)
//!     1001, 1002, 1003
//! Wrote
//!     out/qrcodes_20260119_0930.xlsx
//! ```

use crate::batch::{BatchSummary, ProgressEvent};
use crate::input::InputFormat;
use crate::preview::format_kb;
use crate::types::Record;
use std::path::{Path, PathBuf};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Completion percentage, rounded to the nearest whole number.
fn percent(current: usize, total: usize) -> usize {
    if total == 0 {
        return 100;
    }
    (current * 100 + total / 2) / total
}

// ============================================================================
// check
// ============================================================================

/// Format the parsed records of a `check` run.
pub fn format_check_output(format: InputFormat, records: &[Record]) -> Vec<String> {
    let label = match format {
        InputFormat::Csv => "csv",
        InputFormat::Plain => "plain text",
    };
    let mut lines = vec![format!("Records ({label})")];
    for (i, record) in records.iter().enumerate() {
        lines.push(format!("{} {} {}", format_index(i + 1), record.id, record.name));
    }
    lines.push(format!("{} records valid", records.len()));
    lines
}

pub fn print_check_output(format: InputFormat, records: &[Record]) {
    for line in format_check_output(format, records) {
        println!("{}", line);
    }
}

// ============================================================================
// batch
// ============================================================================

/// Format a single progress event as display lines.
pub fn format_progress_event(event: &ProgressEvent) -> Vec<String> {
    match event {
        ProgressEvent::Started { total } => vec![format!("Generating {} QR codes", total)],
        ProgressEvent::Generated {
            current,
            total,
            id,
            name,
        } => vec![format!(
            "  [{:>3}%] Generated: {} ({}) ({}/{})",
            percent(*current, *total),
            id,
            name,
            current,
            total
        )],
        ProgressEvent::Finished { total } => {
            vec![format!("QR generation complete ({}/{})", total, total)]
        }
    }
}

/// Format the end-of-batch summary and the files written.
pub fn format_batch_summary(summary: &BatchSummary, written: &[PathBuf]) -> Vec<String> {
    let mut lines = vec![format!(
        "Generated {} QR codes ({} KB)",
        summary.count,
        format_kb(summary.total_bytes)
    )];

    let mut preview = summary.preview_ids.join(", ");
    if summary.remaining > 0 {
        preview.push_str(&format!(" and {} more", summary.remaining));
    }
    lines.push(format!("    {}", preview));

    if !written.is_empty() {
        lines.push("Wrote".to_string());
        for path in written {
            lines.push(format!("    {}", path.display()));
        }
    }
    lines
}

pub fn print_batch_summary(summary: &BatchSummary, written: &[PathBuf]) {
    for line in format_batch_summary(summary, written) {
        println!("{}", line);
    }
}

// ============================================================================
// single
// ============================================================================

/// Format the result of a `single` run.
pub fn format_single_output(id: &str, path: &Path) -> Vec<String> {
    vec![
        format!("Generated QR code for ID {}", id),
        format!("    {}", path.display()),
    ]
}

pub fn print_single_output(id: &str, path: &Path) {
    for line in format_single_output(id, path) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(0, 0), 100);
    }

    #[test]
    fn check_output_lists_records() {
        let records = vec![Record::new("1001", "Alice"), Record::unnamed("1002")];
        let lines = format_check_output(InputFormat::Csv, &records);
        assert_eq!(
            lines,
            vec![
                "Records (csv)",
                "001 1001 Alice",
                "002 1002 Unknown",
                "2 records valid",
            ]
        );
    }

    #[test]
    fn progress_started() {
        let lines = format_progress_event(&ProgressEvent::Started { total: 3 });
        assert_eq!(lines, vec!["Generating 3 QR codes"]);
    }

    #[test]
    fn progress_generated() {
        let lines = format_progress_event(&ProgressEvent::Generated {
            current: 1,
            total: 3,
            id: "1001".to_string(),
            name: "Alice".to_string(),
        });
        assert_eq!(lines, vec!["  [ 33%] Generated: 1001 (Alice) (1/3)"]);
    }

    #[test]
    fn progress_finished() {
        let lines = format_progress_event(&ProgressEvent::Finished { total: 3 });
        assert_eq!(lines, vec!["QR generation complete (3/3)"]);
    }

    #[test]
    fn batch_summary_with_remainder() {
        let summary = BatchSummary {
            count: 14,
            total_bytes: 2048,
            preview_ids: vec!["1".to_string(), "2".to_string()],
            remaining: 12,
        };
        let lines = format_batch_summary(&summary, &[PathBuf::from("out/q.zip")]);
        assert_eq!(lines[0], "Generated 14 QR codes (2.0 KB)");
        assert_eq!(lines[1], "    1, 2 and 12 more");
        assert_eq!(lines[2], "Wrote");
        assert_eq!(lines[3], "    out/q.zip");
    }

    #[test]
    fn batch_summary_without_files() {
        let summary = BatchSummary {
            count: 1,
            total_bytes: 0,
            preview_ids: vec!["9".to_string()],
            remaining: 0,
        };
        let lines = format_batch_summary(&summary, &[]);
        assert_eq!(lines, vec!["Generated 1 QR codes (0.0 KB)", "    9"]);
    }

    #[test]
    fn single_output() {
        let lines = format_single_output("A-1", Path::new("qrcode_A-1_20260101_0000.png"));
        assert_eq!(lines[0], "Generated QR code for ID A-1");
        assert_eq!(lines[1], "    qrcode_A-1_20260101_0000.png");
    }
}

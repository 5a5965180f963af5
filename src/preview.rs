//! Self-contained HTML preview of a batch.
//!
//! Shows the batch size, the total PNG size, and a grid of the first
//! [`PREVIEW_LIMIT`] codes as inline data URIs, followed by a note counting
//! the codes that were generated but not shown. The page has no external
//! references, so it can be opened straight from the output directory.
//!
//! Uses [maud](https://maud.lambda.xyz/) so all interpolation is escaped.

use crate::batch::{BatchResult, PREVIEW_LIMIT};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use maud::{DOCTYPE, Markup, html};

/// File name of the preview page.
pub const PREVIEW_FILENAME: &str = "preview.html";

const CSS: &str = "\
body{font-family:sans-serif;margin:2rem;color:#222}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(140px,1fr));gap:1rem}\
.item{text-align:center;border:1px solid #e1e5e9;border-radius:8px;padding:.5rem}\
.item img{max-width:100%;height:auto}\
.more{text-align:center;padding:10px;color:#666;font-style:italic;border-top:1px solid #e1e5e9;margin-top:10px}";

/// `data:image/png;base64,...` for a PNG payload.
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Format bytes as kilobytes with one decimal.
pub fn format_kb(bytes: usize) -> String {
    format!("{:.1}", bytes as f64 / 1024.0)
}

/// Render the preview page for a finished batch.
pub fn render_preview(result: &BatchResult) -> String {
    let summary = result.summary();
    let markup: Markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "QR codes (" (summary.count) ")" }
                style { (CSS) }
            }
            body {
                h1 { "Generated " (summary.count) " QR codes" }
                p { "Total size: " (format_kb(summary.total_bytes)) " KB" }
                div class="grid" {
                    @for entry in result.entries.iter().take(PREVIEW_LIMIT) {
                        div class="item" {
                            img src=(png_data_uri(&entry.png)) alt={ "QR Code for " (entry.id) };
                            div class="id-label" { (entry.id) }
                            div class="name" { (entry.name) }
                        }
                    }
                }
                @if summary.remaining > 0 {
                    div class="more" { (summary.remaining) " more QR codes were generated" }
                }
            }
        }
    };
    markup.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::entry;
    use crate::types::QrEntry;

    fn batch(n: usize) -> BatchResult {
        BatchResult {
            entries: (1..=n).map(|i| entry(&i.to_string())).collect(),
        }
    }

    #[test]
    fn data_uri_prefix() {
        assert_eq!(png_data_uri(b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn format_kb_one_decimal() {
        assert_eq!(format_kb(0), "0.0");
        assert_eq!(format_kb(1536), "1.5");
    }

    #[test]
    fn preview_lists_first_twelve() {
        let html = render_preview(&batch(14));
        assert_eq!(html.matches("class=\"item\"").count(), 12);
        assert!(html.contains("2 more QR codes were generated"));
        assert!(html.contains("Generated 14 QR codes"));
    }

    #[test]
    fn preview_small_batch_has_no_more_note() {
        let html = render_preview(&batch(3));
        assert_eq!(html.matches("class=\"item\"").count(), 3);
        assert!(!html.contains("more QR codes"));
    }

    #[test]
    fn preview_escapes_names() {
        let result = BatchResult {
            entries: vec![QrEntry {
                name: "<b>Bob</b>".to_string(),
                ..entry("1")
            }],
        };
        let html = render_preview(&result);
        assert!(html.contains("&lt;b&gt;Bob&lt;/b&gt;"));
        assert!(!html.contains("<b>Bob</b>"));
    }
}

//! QR generation for single IDs and batches.
//!
//! ## Batch flow
//!
//! ```text
//! records ─▶ validate ─▶ render (parallel) ─▶ BatchResult (input order)
//!                             │
//!                             └─▶ ProgressEvent stream
//! ```
//!
//! Validation covers the whole batch up front: a single bad ID rejects the
//! run before anything is rendered. Rendering runs on a dedicated
//! [rayon](https://docs.rs/rayon) pool sized by `processing.max_processes`
//! (see [`effective_threads`]); progress events still arrive with
//! a strictly increasing `current` counter, and results keep input order.
//! The first render failure aborts the batch.

use crate::config::{ToolConfig, effective_threads};
use crate::imaging::{BackendError, QrBackend, encode_png, render_labeled};
use crate::types::{QrEntry, Record};
use crate::validate::{ValidationError, validate_batch, validate_single_id};
use rayon::prelude::*;
use std::sync::Mutex;
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Number of entries listed in a batch summary preview.
pub const PREVIEW_LIMIT: usize = 12;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("QR generation failed for {id}: {source}")]
    Render {
        id: String,
        #[source]
        source: BackendError,
    },
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Progress reported while a batch renders.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Started {
        total: usize,
    },
    Generated {
        current: usize,
        total: usize,
        id: String,
        name: String,
    },
    Finished {
        total: usize,
    },
}

/// Rendered codes of one batch run, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub entries: Vec<QrEntry>,
}

/// Counts and a short preview of a finished batch.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BatchSummary {
    pub count: usize,
    pub total_bytes: usize,
    pub preview_ids: Vec<String>,
    /// Entries not covered by `preview_ids`.
    pub remaining: usize,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> BatchSummary {
        let preview_ids: Vec<String> = self
            .entries
            .iter()
            .take(PREVIEW_LIMIT)
            .map(|e| e.id.clone())
            .collect();
        BatchSummary {
            count: self.entries.len(),
            total_bytes: self.entries.iter().map(QrEntry::byte_len).sum(),
            remaining: self.entries.len() - preview_ids.len(),
            preview_ids,
        }
    }
}

fn render_entry(
    backend: &impl QrBackend,
    id: &str,
    name: &str,
    config: &ToolConfig,
) -> Result<QrEntry, BatchError> {
    let to_batch_error = |source: BackendError| BatchError::Render {
        id: id.to_string(),
        source,
    };
    let img = render_labeled(backend, id, config).map_err(to_batch_error)?;
    let png = encode_png(&img).map_err(to_batch_error)?;
    Ok(QrEntry {
        id: id.to_string(),
        name: name.to_string(),
        width: img.width(),
        height: img.height(),
        png,
    })
}

/// Validate and render one free-form ID.
pub fn generate_single(
    backend: &impl QrBackend,
    raw_id: &str,
    config: &ToolConfig,
) -> Result<QrEntry, BatchError> {
    let id = validate_single_id(raw_id, &config.limits)?;
    log::debug!("rendering single QR for {id}");
    render_entry(backend, id, crate::types::DEFAULT_NAME, config)
}

/// Validate and render a batch of records.
///
/// When `progress` is given it receives `Started`, one `Generated` per
/// record, and `Finished`. A closed receiver is ignored.
pub fn generate_batch(
    backend: &impl QrBackend,
    records: &[Record],
    config: &ToolConfig,
    progress: Option<Sender<ProgressEvent>>,
) -> Result<BatchResult, BatchError> {
    validate_batch(records, &config.limits)?;

    let total = records.len();
    let send = |event: ProgressEvent| {
        if let Some(tx) = &progress {
            let _ = tx.send(event);
        }
    };
    send(ProgressEvent::Started { total });

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(effective_threads(&config.processing))
        .build()?;

    // Guards the counter and the send together so `current` arrives in order.
    let done = Mutex::new(0usize);

    let entries = pool.install(|| {
        records
            .par_iter()
            .map(|record| -> Result<QrEntry, BatchError> {
                let id = record.id.trim();
                let entry = render_entry(backend, id, &record.name, config)?;
                log::debug!("rendered {} ({}), {} bytes", id, record.name, entry.byte_len());

                let mut done = done.lock().unwrap_or_else(|e| e.into_inner());
                *done += 1;
                send(ProgressEvent::Generated {
                    current: *done,
                    total,
                    id: id.to_string(),
                    name: record.name.clone(),
                });
                Ok(entry)
            })
            .collect::<Result<Vec<_>, BatchError>>()
    })?;

    send(ProgressEvent::Finished { total });
    Ok(BatchResult { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::QrParams;
    use crate::imaging::backend::tests::MockBackend;
    use image::RgbImage;
    use std::sync::mpsc;

    /// Records the size of the rayon pool each render runs on.
    #[derive(Default)]
    struct PoolSizeBackend {
        sizes: Mutex<Vec<usize>>,
    }

    impl QrBackend for PoolSizeBackend {
        fn render(&self, params: &QrParams) -> Result<RgbImage, BackendError> {
            self.sizes.lock().unwrap().push(rayon::current_num_threads());
            Ok(RgbImage::from_pixel(params.size, params.size, params.light))
        }
    }

    fn records(ids: &[&str]) -> Vec<Record> {
        ids.iter().map(|id| Record::new(*id, format!("name-{id}"))).collect()
    }

    #[test]
    fn single_validates_and_renders() {
        let backend = MockBackend::new();
        let entry = generate_single(&backend, "  AB-12 ", &ToolConfig::default()).unwrap();
        assert_eq!(entry.id, "AB-12");
        assert_eq!((entry.width, entry.height), (256, 320));
        assert!(!entry.png.is_empty());
        assert_eq!(backend.rendered_data(), vec!["AB-12".to_string()]);
    }

    #[test]
    fn single_invalid_renders_nothing() {
        let backend = MockBackend::new();
        let err = generate_single(&backend, "a b", &ToolConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            BatchError::Validation(ValidationError::InvalidCharacters)
        ));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn batch_keeps_input_order() {
        let backend = MockBackend::new();
        let input = records(&["30", "10", "20", "5"]);
        let result = generate_batch(&backend, &input, &ToolConfig::default(), None).unwrap();
        let ids: Vec<&str> = result.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["30", "10", "20", "5"]);
        assert_eq!(result.entries[1].name, "name-10");
    }

    #[test]
    fn batch_rejects_invalid_before_rendering() {
        let backend = MockBackend::new();
        let input = records(&["1", "x2"]);
        let err = generate_batch(&backend, &input, &ToolConfig::default(), None).unwrap_err();
        assert!(matches!(
            err,
            BatchError::Validation(ValidationError::InvalidIds { .. })
        ));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn batch_rejects_over_limit() {
        let mut config = ToolConfig::default();
        config.limits.max_batch = 2;
        let err = generate_batch(&MockBackend::new(), &records(&["1", "2", "3"]), &config, None)
            .unwrap_err();
        assert!(matches!(
            err,
            BatchError::Validation(ValidationError::TooMany { count: 3, max: 2 })
        ));
    }

    #[test]
    fn batch_progress_is_ordered() {
        let (tx, rx) = mpsc::channel();
        let input: Vec<Record> = (1..=25).map(|i| Record::unnamed(i.to_string())).collect();
        generate_batch(&MockBackend::new(), &input, &ToolConfig::default(), Some(tx)).unwrap();

        let events: Vec<ProgressEvent> = rx.iter().collect();
        assert_eq!(events.len(), 27);
        assert_eq!(events[0], ProgressEvent::Started { total: 25 });
        assert_eq!(events[26], ProgressEvent::Finished { total: 25 });
        for (i, event) in events[1..26].iter().enumerate() {
            match event {
                ProgressEvent::Generated { current, total, .. } => {
                    assert_eq!(*current, i + 1);
                    assert_eq!(*total, 25);
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
    }

    #[test]
    fn batch_honors_max_processes() {
        let mut config = ToolConfig::default();
        config.processing.max_processes = Some(1);
        let backend = PoolSizeBackend::default();
        let input: Vec<Record> = (1..=8).map(|i| Record::unnamed(i.to_string())).collect();
        generate_batch(&backend, &input, &config, None).unwrap();

        let sizes = backend.sizes.lock().unwrap();
        assert_eq!(sizes.len(), 8);
        assert!(sizes.iter().all(|&n| n == 1), "{sizes:?}");
    }

    #[test]
    fn batch_render_failure_names_id() {
        let backend = MockBackend::failing_on("13");
        let input = records(&["11", "12", "13", "14"]);
        let err = generate_batch(&backend, &input, &ToolConfig::default(), None).unwrap_err();
        match err {
            BatchError::Render { id, .. } => assert_eq!(id, "13"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn batch_closed_receiver_is_ignored() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let result =
            generate_batch(&MockBackend::new(), &records(&["1"]), &ToolConfig::default(), Some(tx));
        assert!(result.is_ok());
    }

    #[test]
    fn summary_previews_first_twelve() {
        let input: Vec<Record> = (1..=15).map(|i| Record::unnamed(i.to_string())).collect();
        let result =
            generate_batch(&MockBackend::new(), &input, &ToolConfig::default(), None).unwrap();
        let summary = result.summary();
        assert_eq!(summary.count, 15);
        assert_eq!(summary.preview_ids.len(), PREVIEW_LIMIT);
        assert_eq!(summary.preview_ids[0], "1");
        assert_eq!(summary.remaining, 3);
        assert_eq!(
            summary.total_bytes,
            result.entries.iter().map(|e| e.png.len()).sum::<usize>()
        );
    }

    #[test]
    fn summary_small_batch_has_no_remainder() {
        let result = generate_batch(
            &MockBackend::new(),
            &records(&["1", "2"]),
            &ToolConfig::default(),
            None,
        )
        .unwrap();
        assert_eq!(result.summary().remaining, 0);
    }
}

//! Input validation.
//!
//! Single IDs are free-form tags (`^[a-zA-Z0-9_-]+$`, bounded length). Batch
//! IDs are stricter: purely numeric (`^\d+$`), because batch input is meant
//! for record numbers exported from another system.

use crate::config::LimitsConfig;
use crate::input::is_numeric_id;
use crate::types::Record;
use thiserror::Error;

/// How many offending IDs an [`ValidationError::InvalidIds`] message lists.
pub const INVALID_ID_PREVIEW: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter an ID.")]
    Empty,
    #[error("IDs must be at most {max} characters (got {len}).")]
    TooLong { len: usize, max: usize },
    #[error("IDs may only contain letters, digits, hyphens and underscores.")]
    InvalidCharacters,
    #[error("No records found in the input.")]
    NoRecords,
    #[error("At most {max} records can be processed at once (got {count}).")]
    TooMany { count: usize, max: usize },
    #[error("Invalid IDs found: {}", list_invalid_ids(.ids, .total))]
    InvalidIds {
        /// The first few offending IDs.
        ids: Vec<String>,
        /// Total number of offending IDs.
        total: usize,
    },
}

fn list_invalid_ids(ids: &[String], total: &usize) -> String {
    let mut list = ids.join(", ");
    if *total > ids.len() {
        list.push_str("...");
    }
    list
}

/// `^[a-zA-Z0-9_-]+$`
fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Validate a single free-form ID and return it trimmed.
pub fn validate_single_id<'a>(
    raw: &'a str,
    limits: &LimitsConfig,
) -> Result<&'a str, ValidationError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ValidationError::Empty);
    }
    let len = id.chars().count();
    if len > limits.max_id_length {
        return Err(ValidationError::TooLong {
            len,
            max: limits.max_id_length,
        });
    }
    if !id.chars().all(is_tag_char) {
        return Err(ValidationError::InvalidCharacters);
    }
    Ok(id)
}

/// Validate a parsed batch: non-empty, within the count limit, numeric IDs.
pub fn validate_batch(records: &[Record], limits: &LimitsConfig) -> Result<(), ValidationError> {
    if records.is_empty() {
        return Err(ValidationError::NoRecords);
    }
    if records.len() > limits.max_batch {
        return Err(ValidationError::TooMany {
            count: records.len(),
            max: limits.max_batch,
        });
    }

    let invalid: Vec<&str> = records
        .iter()
        .map(|r| r.id.trim())
        .filter(|id| !is_numeric_id(id))
        .collect();
    if !invalid.is_empty() {
        return Err(ValidationError::InvalidIds {
            ids: invalid
                .iter()
                .take(INVALID_ID_PREVIEW)
                .map(|id| id.to_string())
                .collect(),
            total: invalid.len(),
        });
    }

    Ok(())
}

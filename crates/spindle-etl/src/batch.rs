//! Batch input and per-batch results.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use spindle_core::model::{NormalizedRecord, ReleaseId};

use crate::error::{NormalizeError, NormalizeResult};

/// What the normalizer does when a record is malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Record the failure and keep going.
    #[default]
    SkipAndContinue,
    /// Return the first failure as the batch error.
    HaltOnFirstError,
}

impl ErrorPolicy {
    #[must_use]
    pub const fn from_halt_flag(halt_on_error: bool) -> Self {
        if halt_on_error {
            Self::HaltOnFirstError
        } else {
            Self::SkipAndContinue
        }
    }
}

/// A record that could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    /// Position of the record in the input batch.
    pub index: usize,
    pub id: Option<ReleaseId>,
    pub reason: String,
}

impl RecordFailure {
    #[must_use]
    pub fn new(index: usize, error: &NormalizeError) -> Self {
        Self {
            index,
            id: error.record_id(),
            reason: error.to_string(),
        }
    }
}

/// Outcome of normalizing one batch under [`ErrorPolicy::SkipAndContinue`].
///
/// `records` keeps the input order of the records that normalized;
/// `failures` lists the rest by input position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub records: Vec<NormalizedRecord>,
    pub failures: Vec<RecordFailure>,
}

impl BatchReport {
    /// Number of input records the report accounts for.
    pub fn total(&self) -> usize {
        self.records.len() + self.failures.len()
    }

    /// Returns `true` when every input record normalized.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Read a batch of raw records from disk.
///
/// Accepts either a JSON array of record objects or JSON lines (one object
/// per line, blank lines ignored). Records are returned undecoded so that
/// one malformed record fails on its own during normalization.
pub fn load_batch(path: &Path) -> NormalizeResult<Vec<Value>> {
    let content = std::fs::read_to_string(path)?;
    parse_batch(&content).map_err(|reason| NormalizeError::MalformedBatch {
        path: path.to_path_buf(),
        reason,
    })
}

fn parse_batch(content: &str) -> Result<Vec<Value>, String> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return match serde_json::from_str::<Value>(content) {
            Ok(Value::Array(values)) => Ok(values),
            Ok(_) => Err("expected a JSON array".to_string()),
            Err(e) => Err(e.to_string()),
        };
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            serde_json::from_str(line).map_err(|e| format!("line {}: {e}", number + 1))
        })
        .collect()
}

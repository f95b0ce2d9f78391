//! Normalization error types for the ETL pipeline.

use std::path::PathBuf;

use spindle_core::model::ReleaseId;
use thiserror::Error;

/// Errors that can occur while normalizing a batch.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A record is missing a required field or a field has the wrong shape.
    #[error("malformed record {}: {reason}", display_id(.id.as_ref()))]
    MalformedInput {
        id: Option<ReleaseId>,
        reason: String,
    },

    /// The batch file itself is not a JSON array of records.
    #[error("malformed batch {}: {reason}", .path.display())]
    MalformedBatch { path: PathBuf, reason: String },

    /// An error propagated from the core domain layer (rule loading).
    #[error("rules error: {0}")]
    Rules(#[from] spindle_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn display_id(id: Option<&ReleaseId>) -> String {
    id.map_or_else(|| "<unknown id>".to_string(), ToString::to_string)
}

impl NormalizeError {
    pub(crate) fn malformed(id: Option<ReleaseId>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            id,
            reason: reason.into(),
        }
    }

    /// Returns `true` when the error concerns a single record rather than
    /// the batch as a whole.
    pub fn is_record_level(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }

    /// The identifier of the failing record, when it could be read.
    pub fn record_id(&self) -> Option<ReleaseId> {
        match self {
            Self::MalformedInput { id, .. } => *id,
            _ => None,
        }
    }
}

/// Convenience alias for normalization results.
pub type NormalizeResult<T> = std::result::Result<T, NormalizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_id() {
        let err = NormalizeError::malformed(Some(ReleaseId::new(99)), "missing field `country`");
        assert_eq!(err.to_string(), "malformed record 99: missing field `country`");
        assert!(err.is_record_level());
        assert_eq!(err.record_id(), Some(ReleaseId::new(99)));
    }

    #[test]
    fn test_malformed_message_without_id() {
        let err = NormalizeError::malformed(None, "expected an object");
        assert_eq!(err.to_string(), "malformed record <unknown id>: expected an object");
        assert!(err.record_id().is_none());
    }

    #[test]
    fn test_io_is_not_record_level() {
        let err = NormalizeError::from(std::io::Error::other("disk full"));
        assert!(!err.is_record_level());
    }
}

use thiserror::Error;

use anamnesis_core::error::CoreError;
use anamnesis_formatter::error::FormatError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error(
        "version conflict for patient {patient_id}: expected stored version {expected:?}, found {actual:?}"
    )]
    VersionConflict {
        patient_id: String,
        expected: Option<u64>,
        actual: Option<u64>,
    },

    #[error("document version {actual} does not follow stored version {expected:?}")]
    InvalidVersion { expected: Option<u64>, actual: u64 },

    #[error("precondition failed for key: {key}")]
    PreconditionFailed { key: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("S3 GetObject error: {0}")]
    GetObject(String),

    #[error("S3 PutObject error: {0}")]
    PutObject(String),

    #[error("S3 ListObjects error: {0}")]
    ListObjects(String),
}

impl StorageError {
    /// Whether another writer got there first. Re-reading and retrying may
    /// succeed.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            StorageError::VersionConflict { .. } | StorageError::PreconditionFailed { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("{0} must not be empty")]
    MissingIdentity(&'static str),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("gave up saving anamnesis for patient {patient_id} after {attempts} conflicting attempts")]
    RetriesExhausted { patient_id: String, attempts: u32 },
}

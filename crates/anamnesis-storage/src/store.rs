use async_trait::async_trait;

use anamnesis_core::models::document::AnamnesisDocument;

use crate::error::StorageError;

/// Persistence for anamnesis documents, one per patient.
///
/// `save` is a compare-and-swap on the version counter: it succeeds only if
/// the currently stored version equals `expected_version` (`None` meaning
/// nothing is stored yet) and the new document carries the version right
/// after it. Two writers that read the same version cannot both succeed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load(&self, patient_id: &str) -> Result<Option<AnamnesisDocument>, StorageError>;

    async fn save(
        &self,
        document: &AnamnesisDocument,
        expected_version: Option<u64>,
    ) -> Result<(), StorageError>;
}

/// Reject a document whose version does not directly follow `expected`.
pub fn check_next_version(
    document: &AnamnesisDocument,
    expected: Option<u64>,
) -> Result<(), StorageError> {
    let want = expected.map_or(Some(1), |v| v.checked_add(1));
    if want != Some(document.version()) {
        return Err(StorageError::InvalidVersion {
            expected,
            actual: document.version(),
        });
    }
    Ok(())
}

/// Reject a write when the stored version moved since the caller read it.
pub fn check_stored_version(
    patient_id: &str,
    stored: Option<u64>,
    expected: Option<u64>,
) -> Result<(), StorageError> {
    if stored != expected {
        return Err(StorageError::VersionConflict {
            patient_id: patient_id.to_string(),
            expected,
            actual: stored,
        });
    }
    Ok(())
}

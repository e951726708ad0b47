//! Read-format-write against a [`DocumentStore`], retrying when another
//! writer bumps the version between our read and our write.

use serde_json::Value;
use tracing::{info, warn};

use anamnesis_core::models::document::AnamnesisDocument;
use anamnesis_core::store_keys;
use anamnesis_formatter::pipeline::{FormatOutcome, FormatRequest, Formatter, SaveMode};

use crate::error::{SaveError, StorageError};
use crate::store::DocumentStore;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Copy)]
pub struct SaveRequest<'a> {
    pub patient_id: &'a str,
    pub author_id: &'a str,
    pub payload: &'a Value,
    pub mode: SaveMode,
}

#[derive(Debug, Clone, Copy)]
pub struct SectionUpdate<'a> {
    pub patient_id: &'a str,
    pub author_id: &'a str,
    pub section_id: &'a str,
    pub payload: &'a Value,
    pub mode: SaveMode,
}

fn require_identity(patient_id: &str, author_id: &str) -> Result<(), SaveError> {
    if patient_id.trim().is_empty() {
        return Err(SaveError::MissingIdentity("patient_id"));
    }
    if author_id.trim().is_empty() {
        return Err(SaveError::MissingIdentity("author_id"));
    }
    Ok(())
}

/// Format a full submission on top of the stored document and persist it.
///
/// Each attempt re-reads the stored document, so a retry after a conflict
/// carries the other writer's version forward. At least one attempt is made
/// whatever `max_attempts` says.
pub async fn save_anamnesis<S>(
    store: &S,
    formatter: &Formatter,
    request: SaveRequest<'_>,
    max_attempts: u32,
) -> Result<FormatOutcome, SaveError>
where
    S: DocumentStore + ?Sized,
{
    require_identity(request.patient_id, request.author_id)?;

    retry(store, request.patient_id, max_attempts, |prior| {
        let outcome = formatter.format_and_assemble(
            FormatRequest {
                payload: request.payload,
                prior,
                author_id: request.author_id,
                patient_id: request.patient_id,
                mode: request.mode,
            },
            jiff::Timestamp::now(),
        )?;
        Ok(outcome)
    })
    .await
}

/// Replace one section of the stored document and persist the result.
/// Fails with [`StorageError::NotFound`] when the patient has no document.
pub async fn save_section<S>(
    store: &S,
    formatter: &Formatter,
    update: SectionUpdate<'_>,
    max_attempts: u32,
) -> Result<FormatOutcome, SaveError>
where
    S: DocumentStore + ?Sized,
{
    require_identity(update.patient_id, update.author_id)?;

    retry(store, update.patient_id, max_attempts, |prior| {
        let prior = prior.ok_or_else(|| StorageError::NotFound {
            key: store_keys::anamnesis(update.patient_id),
        })?;
        let outcome = formatter.update_section(
            prior,
            update.section_id,
            update.payload,
            update.author_id,
            update.mode,
            jiff::Timestamp::now(),
        )?;
        Ok(outcome)
    })
    .await
}

async fn retry<S, F>(
    store: &S,
    patient_id: &str,
    max_attempts: u32,
    mut produce: F,
) -> Result<FormatOutcome, SaveError>
where
    S: DocumentStore + ?Sized,
    F: FnMut(Option<&AnamnesisDocument>) -> Result<FormatOutcome, SaveError>,
{
    let attempts = max_attempts.max(1);

    for attempt in 1..=attempts {
        let prior = store.load(patient_id).await?;
        let expected = prior.as_ref().map(AnamnesisDocument::version);
        let outcome = produce(prior.as_ref())?;

        match store.save(&outcome.document, expected).await {
            Ok(()) => {
                info!(
                    patient_id,
                    version = outcome.document.version(),
                    status = ?outcome.document.metadata.status,
                    completion = outcome.document.metadata.completion_percentage,
                    "saved anamnesis"
                );
                return Ok(outcome);
            }
            Err(e) if e.is_conflict() => {
                warn!(
                    patient_id,
                    attempt,
                    attempts,
                    error = %e,
                    "anamnesis changed concurrently, retrying"
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(SaveError::RetriesExhausted {
        patient_id: patient_id.to_string(),
        attempts,
    })
}

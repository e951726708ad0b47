//! Document Assembler / Versioner.

use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

use anamnesis_core::models::completion::CompletionStats;
use anamnesis_core::models::document::{
    AnamnesisDocument, DocumentMetadata, DocumentStatus, SearchableData,
};
use anamnesis_core::models::section::SectionRecord;

use crate::completion::completed_sections;
use crate::error::FormatError;

/// The derived content of a document, before versioning.
#[derive(Debug, Clone)]
pub struct DocumentParts {
    pub sections: BTreeMap<String, SectionRecord>,
    pub stats: CompletionStats,
    pub search_terms: BTreeSet<String>,
    pub status: DocumentStatus,
}

/// Who is saving, and for whom.
#[derive(Debug, Clone, Copy)]
pub struct Authorship<'a> {
    pub author_id: &'a str,
    pub patient_id: &'a str,
}

/// The version the next save must carry: 1 for a first save, otherwise the
/// prior version plus one.
pub fn next_version(prior: Option<&AnamnesisDocument>) -> Result<u64, FormatError> {
    match prior {
        None => Ok(1),
        Some(doc) => doc.metadata.version.checked_add(1).ok_or_else(|| {
            FormatError::MalformedInput(format!(
                "prior version {} cannot be incremented",
                doc.metadata.version
            ))
        }),
    }
}

/// Combine `parts` with versioning metadata. The id and creation time of
/// `prior` are carried over; everything else is taken from this save.
pub fn assemble(
    parts: DocumentParts,
    prior: Option<&AnamnesisDocument>,
    authorship: Authorship<'_>,
    completion_threshold: u8,
    now: jiff::Timestamp,
) -> Result<AnamnesisDocument, FormatError> {
    let version = next_version(prior)?;
    let (id, created_at) = match prior {
        Some(doc) => (doc.metadata.id, doc.metadata.created_at),
        None => (Uuid::new_v4(), now),
    };

    let completed_sections = completed_sections(&parts.stats, completion_threshold);

    Ok(AnamnesisDocument {
        metadata: DocumentMetadata {
            id,
            created_at,
            updated_at: now,
            version,
            patient_id: authorship.patient_id.to_string(),
            last_updated_by: authorship.author_id.to_string(),
            status: parts.status,
            completion_percentage: parts.stats.total,
            section_completion: parts.stats.by_section,
            completed_sections,
        },
        sections: parts.sections,
        searchable_data: SearchableData {
            search_terms: parts.search_terms,
        },
    })
}
